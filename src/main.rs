/// Command-line entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::{Parser, Subcommand};
    use imgproc_client::native::{
        DataUrlFileView, FileImageView, NativeNotifier, init_logging, load_file, pick_image,
    };
    use imgproc_client::{
        ClientConfig, DispatchOutcome, Dispatcher, HttpTransport, LogLevel, Notifier, Operation,
        PreviewHandler, PreviewOutcome,
    };

    #[derive(Parser)]
    #[command(
        name = "imgproc-native",
        version,
        about = "Send an image to the processing service and save the result"
    )]
    struct Cli {
        #[command(subcommand)]
        operation: Command,

        /// Image to process; a file dialog opens when omitted
        #[arg(long, global = true)]
        image: Option<PathBuf>,

        /// Service address (default from config, else http://localhost:8000/)
        #[arg(long, global = true)]
        base_url: Option<String>,

        /// Where to write the processed JPEG
        #[arg(long, short, global = true)]
        output: Option<PathBuf>,

        /// Also write the preview data URL of the input to this file
        #[arg(long, global = true)]
        preview: Option<PathBuf>,

        /// Report errors on stderr instead of a dialog, and never open a file picker
        #[arg(long, global = true)]
        headless: bool,

        /// error, warn, info, debug or trace
        #[arg(long, global = true, value_parser = parse_log_level)]
        log_level: Option<LogLevel>,

        /// Persist --base-url/--output/--log-level to the config file
        #[arg(long, global = true)]
        save_config: bool,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Cut out a rectangle
        Crop {
            #[arg(long, default_value = "0", allow_hyphen_values = true)]
            x: String,
            #[arg(long, default_value = "0", allow_hyphen_values = true)]
            y: String,
            #[arg(long, default_value = "100", allow_hyphen_values = true)]
            width: String,
            #[arg(long, default_value = "100", allow_hyphen_values = true)]
            height: String,
        },
        /// Convert to grayscale
        Grayscale,
        /// Apply the server's convolution filter
        Convolution,
    }

    fn parse_log_level(name: &str) -> Result<LogLevel, String> {
        LogLevel::from_name(name).ok_or_else(|| {
            let names: Vec<_> = LogLevel::all().iter().map(LogLevel::name).collect();
            format!("expected one of: {}", names.join(", "))
        })
    }

    fn apply_overrides(cli: &Cli, config: &mut ClientConfig) -> Result<(), String> {
        if let Some(url) = &cli.base_url {
            config.set_base_url(url).map_err(|e| e.to_string())?;
        }
        if let Some(output) = &cli.output {
            config.output_path = output.display().to_string();
        }
        if let Some(level) = cli.log_level {
            config.log_level = level;
        }
        Ok(())
    }

    pub fn run() -> ExitCode {
        let cli = Cli::parse();

        // Logging isn't up yet, so a load error is reported after init
        let loaded = ClientConfig::load_from_default_path();
        let mut config = match &loaded {
            Ok(Some(config)) => config.clone(),
            _ => ClientConfig::default(),
        };
        if let Err(e) = apply_overrides(&cli, &mut config) {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
        init_logging(config.log_level);
        if let Err(e) = loaded {
            log::warn!("Ignoring config file, using defaults: {}", e);
        }

        if cli.save_config {
            if let Err(e) = config.save_to_default_path() {
                log::error!("Failed to save configuration: {}", e);
            }
        }

        let notifier = if cli.headless {
            NativeNotifier::Stderr
        } else {
            NativeNotifier::Dialog
        };

        let path = match &cli.image {
            Some(path) => Some(path.clone()),
            None if cli.headless => None,
            None => pick_image(),
        };

        let file = match path {
            Some(path) => {
                let preview = PreviewHandler::new();
                let preview_view = DataUrlFileView::new(cli.preview.clone());
                match pollster::block_on(preview.show(load_file(&path), &preview_view)) {
                    PreviewOutcome::Shown(file) => Some(file),
                    PreviewOutcome::Failed { message, .. } => {
                        notifier.alert(&message);
                        return ExitCode::FAILURE;
                    }
                    PreviewOutcome::Superseded(_) => None,
                }
            }
            None => None,
        };

        let transport = match HttpTransport::new() {
            Ok(transport) => transport,
            Err(e) => {
                log::error!("Could not create HTTP client: {}", e);
                notifier.alert(&e.user_message());
                return ExitCode::FAILURE;
            }
        };
        let dispatcher = Dispatcher::new(config.base_url.clone(), transport);
        let result_view = FileImageView::new(&config.output_path);

        let outcome = pollster::block_on(async {
            match &cli.operation {
                Command::Crop {
                    x,
                    y,
                    width,
                    height,
                } => {
                    dispatcher
                        .crop_from_fields(
                            [x.as_str(), y.as_str(), width.as_str(), height.as_str()],
                            file.as_ref(),
                            &result_view,
                            &notifier,
                        )
                        .await
                }
                Command::Grayscale => {
                    dispatcher
                        .dispatch(Operation::Grayscale, file.as_ref(), &result_view, &notifier)
                        .await
                }
                Command::Convolution => {
                    dispatcher
                        .dispatch(
                            Operation::Convolution,
                            file.as_ref(),
                            &result_view,
                            &notifier,
                        )
                        .await
                }
            }
        });

        match outcome {
            DispatchOutcome::Displayed(_) => match result_view.take_error() {
                None => {
                    println!("{}", result_view.path().display());
                    ExitCode::SUCCESS
                }
                Some(e) => {
                    eprintln!("Could not save result: {}", e);
                    ExitCode::FAILURE
                }
            },
            _ => ExitCode::FAILURE,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
