use std::path::PathBuf;

use tracing::info;

use daybook_core::{FileStore, VERSION};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_data_dir, write_config, DaybookConfig};
use crate::constants::DEFAULT_CATEGORY;
use crate::errors::CliError;
use crate::ui::theme::{styled, styles, symbols};
use crate::ui::{badge, hint, print, prompt_confirm, prompt_input, Badge, OutputMode};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let interactive = !args.no_input && ui_ctx.is_interactive();

    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        let prompt = format!("Overwrite config at {}?", config_path.display());
        if interactive && prompt_confirm(&ui_ctx, &prompt, false)? {
            info!(config = %config_path.display(), "overwriting config");
        } else {
            return Err(CliError::invalid_input_with_hint(
                format!("Config already exists at {}", config_path.display()),
                "Hint: Pass --force to overwrite it.",
            )
            .into());
        }
    }

    if !ctx.quiet() && ui_ctx.mode.is_pretty() {
        let title = styled("Daybook", styles::bold(), ui_ctx.color);
        let sep = symbols::SEP.get(ui_ctx.unicode);
        println!("{} {} init", title, sep);
        let version_line = format!("v{}", VERSION);
        println!("{}", styled(&version_line, styles::dim(), ui_ctx.color));
        println!();
    }

    let default_dir = match args.dir.clone().or_else(|| ctx.cli().data_dir.clone()) {
        Some(value) => PathBuf::from(value),
        None => default_data_dir()?,
    };
    let data_dir = if interactive && args.dir.is_none() {
        let default_text = default_dir.to_string_lossy().to_string();
        let input = prompt_input(&ui_ctx, "Data directory", Some(default_text.as_str()))?;
        PathBuf::from(input.trim())
    } else {
        default_dir
    };

    let default_category = match args.default_category.clone() {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        Some(_) => {
            return Err(CliError::invalid_input("--default-category cannot be empty").into());
        }
        None if interactive => {
            let input = prompt_input(&ui_ctx, "Default category", Some(DEFAULT_CATEGORY))?;
            let trimmed = input.trim();
            if trimmed.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                trimmed.to_string()
            }
        }
        None => DEFAULT_CATEGORY.to_string(),
    };

    FileStore::open(&data_dir)?;
    let config = DaybookConfig::new(data_dir.clone(), Some(default_category.clone()));
    write_config(&config_path, &config)?;
    info!(
        data_dir = %data_dir.display(),
        config = %config_path.display(),
        "initialized daybook"
    );

    if ctx.quiet() {
        return Ok(());
    }
    match ui_ctx.mode {
        OutputMode::Pretty => {
            print(
                &ui_ctx,
                &badge(
                    &ui_ctx,
                    Badge::Ok,
                    &format!("Data directory ready at {}", data_dir.display()),
                ),
            );
            print(
                &ui_ctx,
                &badge(
                    &ui_ctx,
                    Badge::Ok,
                    &format!("Config written to {}", config_path.display()),
                ),
            );
            println!();
            let sep = symbols::SEP.get(ui_ctx.unicode);
            print(
                &ui_ctx,
                &hint(
                    &ui_ctx,
                    &format!(
                        "daybook add -m \"...\"  {}  daybook calendar  {}  daybook --help",
                        sep, sep
                    ),
                ),
            );
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("status=ok");
            println!("data_dir={}", data_dir.display());
            println!("config_path={}", config_path.display());
            println!("default_category={}", default_category);
        }
    }
    Ok(())
}
