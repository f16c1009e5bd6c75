use clap::CommandFactory;
use clap_complete::generate;

use daybook_core::date_key::{to_long_display, year_label};
use daybook_core::{to_display, to_key};

use crate::app::AppContext;
use crate::cli::{Cli, CompletionsArgs, KeyArgs};
use crate::helpers::parse_date;
use crate::output::key_json;
use crate::ui::{kv, print};

pub fn handle_completions(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "daybook", &mut std::io::stdout());
    Ok(())
}

pub fn handle_key(ctx: &AppContext, args: &KeyArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let date = parse_date(&args.date)?;
    let key = to_key(date);

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&key_json(date, &key))?);
        return Ok(());
    }

    print(&ui_ctx, &kv(&ui_ctx, "Key", key.as_str()));
    print(&ui_ctx, &kv(&ui_ctx, "Display", &to_display(date)));
    print(&ui_ctx, &kv(&ui_ctx, "Long display", &to_long_display(date)));
    print(&ui_ctx, &kv(&ui_ctx, "Year", &year_label(chrono::Datelike::year(&date))));
    Ok(())
}
