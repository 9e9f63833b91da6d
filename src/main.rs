use clap::Parser;
use govlift::{cli, config, error, lift_workbook, output, source};
use cli::{Cli, Commands, SchemaChoice};
use config::Config;
use error::Result;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI指定がなければ設定値を使う
fn resolve_schema(choice: Option<SchemaChoice>, config: &Config) -> Result<SchemaChoice> {
    match choice {
        Some(choice) => Ok(choice),
        None => config.schema_choice(),
    }
}

fn resolve_columns(cli_columns: Vec<usize>, config: &Config) -> Vec<usize> {
    if cli_columns.is_empty() {
        config.data_columns.clone()
    } else {
        cli_columns
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Convert { input, sheet, output, schema, data_columns, yes } => {
            println!("🗂  govlift - Turtle変換\n");

            let input: PathBuf = input.unwrap_or_else(|| config.input.clone());
            let sheet = sheet.unwrap_or_else(|| config.sheet.clone());
            let output_path = output.unwrap_or_else(|| config.output.clone());
            let schema = resolve_schema(schema, &config)?;
            let data_columns = resolve_columns(data_columns, &config);

            println!("[1/2] 参照表を変換中... ({} / シート: {} / スキーマ: {})", input.display(), sheet, schema);
            let report = lift_workbook(&input, &sheet, schema.schema(), &data_columns)?;
            println!("✔ {}プロファイルから{}ノードを生成", report.profiles, report.nodes);
            if report.skipped() > 0 {
                println!("  - 主ラベルなしでスキップ: {}列", report.skipped());
            }

            println!("[2/2] 書き出し中...");
            match output::write_document(&output_path, &report.document, yes)? {
                output::WriteOutcome::Written => {
                    println!("✔ Wrote {} ({} profiles)", output_path.display(), report.profiles)
                }
                output::WriteOutcome::Unchanged => {
                    println!("✔ 変更なし: {}", output_path.display())
                }
            }

            println!("\n✅ 変換完了");
        }

        Commands::Inspect { input, sheet } => {
            let input = input.unwrap_or_else(|| config.input.clone());
            let sheet = sheet.unwrap_or_else(|| config.sheet.clone());

            let grid = source::load_grid(&input, &sheet)?;
            let profiles = govlift_common::collect_profiles(&grid);
            println!("{}", govlift_common::profiles_to_json(&profiles)?);
        }

        Commands::Check { input, sheet, output, schema, data_columns } => {
            let input = input.unwrap_or_else(|| config.input.clone());
            let sheet = sheet.unwrap_or_else(|| config.sheet.clone());
            let output_path = output.unwrap_or_else(|| config.output.clone());
            let schema = resolve_schema(schema, &config)?;
            let data_columns = resolve_columns(data_columns, &config);

            let report = lift_workbook(&input, &sheet, schema.schema(), &data_columns)?;
            let digest = output::check_document(&output_path, &report.document)?;
            println!("✔ 最新です: {} (sha256: {})", output_path.display(), digest);
        }

        Commands::Config { set_input, set_sheet, set_output, set_schema, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(input) = set_input {
                config.input = input;
                changed = true;
            }
            if let Some(sheet) = set_sheet {
                config.sheet = sheet;
                changed = true;
            }
            if let Some(output) = set_output {
                config.output = output;
                changed = true;
            }
            if let Some(schema) = set_schema {
                config.schema = schema.to_string();
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  入力: {}", config.input.display());
                println!("  シート: {}", config.sheet);
                println!("  出力: {}", config.output.display());
                println!("  スキーマ: {}", config.schema);
                println!("  Data列: {:?}", config.data_columns);
            }
        }
    }

    Ok(())
}
