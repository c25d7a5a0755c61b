//! Interactive API key bootstrap

use std::path::Path;

use anyhow::{Result, bail};
use sue_ai::AppConfig;

use super::CliConfig;

/// Make sure a Mistral API key is available, asking for one if needed.
///
/// A key entered at the prompt is saved into the config file so the next
/// start does not ask again.
pub fn ensure_api_key(
    app: &mut AppConfig,
    file: &mut CliConfig,
    path: Option<&Path>,
) -> Result<()> {
    if !app.api_key.trim().is_empty() {
        return Ok(());
    }

    println!("API ключ Mistral отсутствует.");
    let key = rpassword::prompt_password("Введите ваш Mistral API ключ: ")?;
    store_api_key(app, file, path, &key)?;
    if path.is_some() {
        println!("Mistral API ключ успешно сохранен.");
    }
    Ok(())
}

fn store_api_key(
    app: &mut AppConfig,
    file: &mut CliConfig,
    path: Option<&Path>,
    key: &str,
) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        bail!("API ключ не может быть пустым.");
    }

    file.api_keys.mistral = Some(key.to_string());
    if let Some(path) = path {
        file.save_to_path(path)
            .map_err(|e| anyhow::anyhow!("Не удалось сохранить ключ в {}: {e:#}", path.display()))?;
    }
    app.api_key = key.to_string();
    Ok(())
}
