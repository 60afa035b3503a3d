//! Command-line entry point (native).

#[cfg(feature = "native")]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::{Parser, Subcommand};
    use notecanvas_app::{App, AppConfig, AppError, AppResult, ShortcutRegistry, UiAction};
    use notecanvas_core::NotebookKind;

    #[derive(Parser)]
    #[command(name = "notecanvas", version, about = "Notebook sketching canvas")]
    struct Cli {
        /// Storage directory (defaults to the platform data directory).
        #[arg(long, global = true)]
        data_dir: Option<PathBuf>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// List notebooks.
        List,
        /// Create a notebook.
        Create {
            name: String,
            /// Paper type: blank, lined, grid or dotted.
            #[arg(long, default_value = "blank")]
            kind: NotebookKind,
        },
        /// Export a notebook's saved drawing as PNG.
        Export { id: String, out: PathBuf },
        /// Print the keyboard shortcuts.
        Shortcuts,
    }

    pub fn main() -> ExitCode {
        env_logger::init();
        match run(Cli::parse()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        }
    }

    fn run(cli: Cli) -> AppResult<()> {
        let mut config = AppConfig::default();
        if let Some(dir) = cli.data_dir {
            config = config.with_data_dir(dir);
        }

        match cli.command {
            Command::List => {
                let app = App::open(config)?;
                for entry in app.ui_state()?.notebooks {
                    println!("{}  {:<13} {}", entry.id, entry.kind_label, entry.name);
                }
            }
            Command::Create { name, kind } => {
                let mut app = App::open(config)?;
                app.handle_action(UiAction::CreateNotebook { name, kind })?;
                let state = app.ui_state()?;
                let created = state
                    .selected()
                    .ok_or_else(|| AppError::InvalidInput("notebook was not created".to_string()))?;
                println!("{}", created.id);
            }
            Command::Export { id, out } => {
                let app = App::open(config)?;
                let png = app.export_png(&id)?;
                std::fs::write(&out, png)?;
                log::info!("Exported notebook {} to {}", id, out.display());
            }
            Command::Shortcuts => ShortcutRegistry::print_all(),
        }
        Ok(())
    }
}

#[cfg(feature = "native")]
fn main() -> std::process::ExitCode {
    cli::main()
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
