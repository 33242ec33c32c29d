//! Command handlers.

use console::style;
use skinsystem_core::ports::{CapeRepository, ProfileRepository};
use skinsystem_core::{Error, TextureProfile};
use skinsystem_store::{
    FilesystemCapeRepository, RedisBackend, StorageSettings, StoredProfileRepository,
};
use std::path::Path;
use std::sync::Arc;

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

fn profile_repository(
    settings: &StorageSettings,
) -> Result<StoredProfileRepository, Box<dyn std::error::Error>> {
    let backend = RedisBackend::new(&settings.redis)?;
    Ok(StoredProfileRepository::new(Arc::new(backend)))
}

fn print_profile(profile: &TextureProfile) -> HandlerResult {
    println!("{}", serde_json::to_string_pretty(profile)?);
    Ok(())
}

fn report_miss(err: Error) -> HandlerResult {
    if err.is_not_found() {
        println!("{} {}", style("!").yellow(), err);
        return Ok(());
    }

    Err(err.into())
}

/// Find a profile by username.
pub async fn profile_by_username(settings: &StorageSettings, username: &str) -> HandlerResult {
    let repository = profile_repository(settings)?;
    match repository.find_by_username(username).await {
        Ok(profile) => print_profile(&profile),
        Err(e) => report_miss(e),
    }
}

/// Find a profile by account id.
pub async fn profile_by_id(settings: &StorageSettings, id: i64) -> HandlerResult {
    let repository = profile_repository(settings)?;
    match repository.find_by_user_id(id).await {
        Ok(profile) => print_profile(&profile),
        Err(e) => report_miss(e),
    }
}

/// Fetch a cape image.
pub async fn cape(
    settings: &StorageSettings,
    username: &str,
    output: Option<&Path>,
) -> HandlerResult {
    let repository = FilesystemCapeRepository::new(&settings.filesystem)?;
    let cape = match repository.find_by_username(username).await {
        Ok(cape) => cape,
        Err(e) => return report_miss(e),
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, &cape.data).await?;
            println!(
                "{} Wrote {} bytes to {}",
                style("✓").green(),
                cape.len(),
                path.display()
            );
        }
        None => println!("{} Cape found ({} bytes)", style("✓").green(), cape.len()),
    }

    Ok(())
}

/// Decode a stored record dump.
pub async fn decode(path: &Path) -> HandlerResult {
    let data = tokio::fs::read(path).await?;
    let profile = StoredProfileRepository::from_stored(&data)?;
    print_profile(&profile)
}

/// Ping the backend.
pub async fn ping(settings: &StorageSettings) -> HandlerResult {
    profile_repository(settings)?.ping().await?;
    println!("{} Backend is reachable", style("✓").green());
    Ok(())
}

/// Show configuration.
pub fn show_config(settings: &StorageSettings) -> HandlerResult {
    println!("Storage configuration:");
    println!(
        "  redis.host: {}",
        settings.redis.host.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  redis.port: {}",
        settings
            .redis
            .port
            .map(|p| p.to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("  redis.pool_size: {}", settings.redis.pool_size);
    println!(
        "  filesystem.base_path: {}",
        settings
            .filesystem
            .base_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );

    if let Ok(path) = crate::config::config_path() {
        println!("\nConfig file: {}", path.display());
    }

    Ok(())
}
