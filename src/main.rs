use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use folio::code::{WriterClipboard, code_blocks};
use folio::content::{
    BlogMetadata, ContentKind, ContentStore, Metadata, ProjectMetadata, TutorialMetadata,
    split_frontmatter,
};
use folio::favorites::{Favorites, JsonFileStore};
use folio::{Block, Config, blocks_to_html};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Render portfolio, blog and tutorial content")]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "folio.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a Markdown file
    Render {
        /// Input Markdown file, frontmatter allowed
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },
    /// List the items of a content kind
    List { kind: Kind },
    /// Render one content item by slug
    Show {
        kind: Kind,
        slug: String,

        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },
    /// Copy the n-th code block (1-based) of a Markdown file to stdout
    Copy { input: PathBuf, index: usize },
    /// Save or unsave a tutorial
    Save { slug: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Projects,
    Blog,
    Tutorials,
}

impl From<Kind> for ContentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Projects => ContentKind::Projects,
            Kind::Blog => ContentKind::Blog,
            Kind::Tutorials => ContentKind::Tutorials,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Json,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Command::Render {
            input,
            output,
            format,
        } => {
            let blocks = read_blocks(&input)?;
            let rendered = format_blocks(&blocks, format, &config)?;
            match output {
                Some(output) => {
                    fs::write(&output, rendered)
                        .with_context(|| format!("writing {}", output.display()))?;
                    log::info!("Created {}", output.display());
                }
                None => io::stdout().write_all(rendered.as_bytes())?,
            }
        }
        Command::List { kind } => {
            let store = ContentStore::new(&config.content.root);
            let kind = ContentKind::from(kind);
            let entries = match kind {
                ContentKind::Projects => titles::<ProjectMetadata>(&store, kind)?,
                ContentKind::Blog => titles::<BlogMetadata>(&store, kind)?,
                ContentKind::Tutorials => titles::<TutorialMetadata>(&store, kind)?,
            };
            let mut stdout = io::stdout().lock();
            for (slug, title) in entries {
                writeln!(stdout, "{slug}\t{title}")?;
            }
        }
        Command::Show { kind, slug, format } => {
            let store = ContentStore::new(&config.content.root);
            let kind = ContentKind::from(kind);
            let blocks = match kind {
                ContentKind::Projects => item_blocks::<ProjectMetadata>(&store, kind, &slug)?,
                ContentKind::Blog => item_blocks::<BlogMetadata>(&store, kind, &slug)?,
                ContentKind::Tutorials => item_blocks::<TutorialMetadata>(&store, kind, &slug)?,
            };
            let Some(blocks) = blocks else {
                bail!("no {kind} item named {slug}");
            };
            io::stdout().write_all(format_blocks(&blocks, format, &config)?.as_bytes())?;
        }
        Command::Copy { input, index } => {
            let blocks = read_blocks(&input)?;
            let mut views = code_blocks(&blocks);
            let count = views.len();
            let Some(view) = index.checked_sub(1).and_then(|i| views.get_mut(i)) else {
                bail!("{} has {count} code blocks, no block {index}", input.display());
            };
            let mut clipboard = WriterClipboard::new(io::stdout().lock());
            view.copy(&mut clipboard)?;
        }
        Command::Save { slug } => {
            let mut favorites = Favorites::new(JsonFileStore::new(&config.favorites.path));
            if favorites.toggle(&slug)? {
                println!("Saved {slug}");
            } else {
                println!("Removed {slug}");
            }
        }
    }

    Ok(())
}

fn read_blocks(input: &Path) -> Result<Vec<Block>> {
    let source =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let (_, body) =
        split_frontmatter(&source).with_context(|| format!("parsing {}", input.display()))?;
    Ok(folio::parse(body))
}

fn format_blocks(blocks: &[Block], format: Format, config: &Config) -> Result<String> {
    Ok(match format {
        Format::Html => blocks_to_html(blocks, &config.render),
        Format::Json => serde_json::to_string_pretty(blocks)? + "\n",
    })
}

fn titles<T: Metadata>(store: &ContentStore, kind: ContentKind) -> Result<Vec<(String, String)>> {
    Ok(store
        .list::<T>(kind)?
        .iter()
        .map(|item| (item.slug().to_string(), item.title().to_string()))
        .collect())
}

fn item_blocks<T: Metadata>(
    store: &ContentStore,
    kind: ContentKind,
    slug: &str,
) -> Result<Option<Vec<Block>>> {
    Ok(store.get::<T>(kind, slug)?.map(|item| item.blocks()))
}
