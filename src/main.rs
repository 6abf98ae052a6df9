use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::debug;

use mdprint::{
    Config, EditorSession, Error, PagePresetKey, PdfImageInput, PdfImageSink, Selection,
    ToolbarAction,
};

/// Looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "mdprint.toml";

#[derive(Parser)]
#[command(name = "mdprint")]
#[command(about = "Style, paginate and export Markdown documents")]
struct Cli {
    /// Session defaults (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Styleset JSON applied on top of the config
    #[arg(long, global = true)]
    styleset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a print-ready HTML document for a Markdown file
    Render {
        /// Input Markdown file
        input: PathBuf,

        /// Output HTML file (defaults to input name with .html extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the paged-media stylesheet
    Css,
    /// Export or validate styleset files
    Styleset {
        #[command(subcommand)]
        action: StylesetCommand,
    },
    /// Print the page slicing plan for a rendered canvas
    Plan {
        #[arg(long)]
        canvas_width: f64,

        #[arg(long)]
        canvas_height: f64,

        #[arg(long, default_value = "a4")]
        page: String,

        #[arg(long, default_value_t = 12.0)]
        margin: f64,
    },
    /// Apply a toolbar action to a selection in a Markdown file
    Edit {
        /// bold, italic, link, heading, quote, bullet-list, numbered-list, code-block, table, rule
        action: String,

        file: PathBuf,

        #[arg(long, default_value_t = 0)]
        start: usize,

        #[arg(long)]
        end: Option<usize>,

        /// Write the result back instead of printing it
        #[arg(long)]
        in_place: bool,
    },
    /// Print word count and title
    Stats { input: PathBuf },
}

#[derive(Subcommand)]
enum StylesetCommand {
    /// Write the current styleset as JSON
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a styleset file and print it normalized
    Check { file: PathBuf },
}

/// Prints each placement as the PDF writer would receive it.
struct PrintSink {
    page: usize,
}

impl PdfImageSink for PrintSink {
    fn add_page(&mut self) {
        self.page += 1;
    }

    fn place_image(&mut self, x_mm: f64, y_mm: f64, width_mm: f64, height_mm: f64) {
        println!(
            "page {}: image at ({:.2}, {:.2}) mm, {:.2} x {:.2} mm",
            self.page, x_mm, y_mm, width_mm, height_mm
        );
    }
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), Error> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn load_session(cli: &Cli) -> Result<EditorSession, Error> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load(Path::new(DEFAULT_CONFIG_FILE)),
    };
    let mut session = config.to_session();
    if let Some(path) = &cli.styleset {
        let styleset = mdprint::parse_styleset(&read(path)?)?;
        debug!("applying styleset from {}", path.display());
        session.apply_styleset(styleset);
    }
    Ok(session)
}

fn run(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Command::Render { input, output } => {
            let session = load_session(cli)?;
            let markdown = read(input)?;
            let html = mdprint::markdown_to_html_document(&markdown, &session.to_styleset());
            let output = output.clone().unwrap_or_else(|| input.with_extension("html"));
            write(&output, &html)?;
            println!("Created {}", output.display());
        }
        Command::Css => {
            print!("{}", load_session(cli)?.paged_css());
        }
        Command::Styleset { action } => match action {
            StylesetCommand::Export { output } => {
                let json = load_session(cli)?.to_styleset().to_json();
                match output {
                    Some(path) => {
                        write(path, &json)?;
                        println!("Created {}", path.display());
                    }
                    None => println!("{}", json),
                }
            }
            StylesetCommand::Check { file } => {
                let styleset = mdprint::parse_styleset(&read(file)?)?;
                println!("{}", styleset.to_json());
            }
        },
        Command::Plan {
            canvas_width,
            canvas_height,
            page,
            margin,
        } => {
            let page = page.parse::<PagePresetKey>()?.preset();
            let plan = mdprint::build_pdf_image_plan(&PdfImageInput {
                canvas_width_px: *canvas_width,
                canvas_height_px: *canvas_height,
                page_width_mm: page.width_mm,
                page_height_mm: page.height_mm,
                margin_mm: *margin,
            });
            println!("{} ({} x {} mm), {} page(s)", page.label, page.width_mm, page.height_mm, plan.page_count());
            println!(
                "margin {:.2} mm, printable {:.2} x {:.2} mm, image height {:.2} mm",
                plan.safe_margin_mm,
                plan.printable_width_mm,
                plan.printable_height_mm,
                plan.rendered_height_mm
            );
            mdprint::place_image_plan(&plan, &mut PrintSink { page: 1 });
        }
        Command::Edit {
            action,
            file,
            start,
            end,
            in_place,
        } => {
            let action: ToolbarAction = action.parse()?;
            let text = read(file)?;
            let end = end.unwrap_or(*start);
            let edit = action.apply(&text, Selection::new(*start, end));
            if *in_place {
                write(file, &edit.text)?;
            } else {
                print!("{}", edit.text);
            }
            eprintln!("selection: {}..{}", edit.selection.start, edit.selection.end);
        }
        Command::Stats { input } => {
            let markdown = read(input)?;
            if let Some(title) = mdprint::document_title(&markdown) {
                println!("title: {}", title);
            }
            println!("words: {}", mdprint::word_count(&markdown));
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
