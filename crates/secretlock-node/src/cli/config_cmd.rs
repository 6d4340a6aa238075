use super::commands::{Cli, ConfigAction};
use super::utils::{config_path, emit, fail_mark, load_config, ok_mark};
use secretlock_types::{LockError, LockResult};

pub fn handle_config(cli: &Cli, action: Option<ConfigAction>) -> LockResult<()> {
    let path = config_path(cli);

    match action {
        Some(ConfigAction::Show) | None => {
            let redacted = load_config(cli)?.redacted();
            let value = serde_json::to_value(&redacted)
                .map_err(|e| LockError::Serialization(format!("Failed to render config: {}", e)))?;
            emit(cli.format, value, || {
                println!("\x1b[38;5;245m# {}\x1b[0m", path.display());
                println!("{}", redacted);
            })?;
        }
        Some(ConfigAction::Validate) => match load_config(cli) {
            Ok(_) => ok_mark("Configuration is valid"),
            Err(e) => {
                fail_mark(format!("Configuration error: {}", e));
                return Err(e);
            }
        },
        Some(ConfigAction::Init) => {
            if path.exists() {
                return Err(LockError::Config(format!("{} already exists", path.display())));
            }
            load_config(cli)?.save(&path)?;
            ok_mark(format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}
