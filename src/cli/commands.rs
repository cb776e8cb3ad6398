use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "htmltoc")]
#[command(version)]
#[command(about = "Generate a nested table of contents from HTML headings")]
#[command(
    long_about = "htmltoc - Insert a table of contents built from the headings of an HTML document.\n\n\
    Headings are rendered as nested <ul>/<li> lists inside a container element, one list\n\
    per heading level. Without a container, a <div> is created at the start of <body>.\n\n\
    Examples:\n  \
    htmltoc page.html                    # Print page with TOC inserted\n  \
    htmltoc --fragment page.html         # Print only the TOC container\n  \
    htmltoc --tree page.html             # Show the TOC as a tree\n  \
    htmltoc --headings 'h2, h3' page.html\n  \
    curl -s https://example.com | htmltoc --list"
)]
pub struct Cli {
    /// HTML file to read, or '-' for stdin
    ///
    /// If no file is specified and stdin is piped, input is read from stdin.
    pub file: Option<PathBuf>,

    /// Selector used to collect headings
    ///
    /// Comma-separated list of tag, #id and .class selectors, optionally
    /// joined by descendant whitespace.
    ///
    /// Example: --headings "article h2, article h3"
    #[arg(long = "headings", value_name = "SELECTOR")]
    pub headings: Option<String>,

    /// Id of an existing element to use as the container
    #[arg(short = 'c', long = "container", value_name = "ID")]
    pub container: Option<String>,

    /// Prefix for the container id and the generated class names
    ///
    /// Defaults to the container's id, or "toc".
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Id of the element to search for headings (default: whole document)
    #[arg(short = 'r', long = "root", value_name = "ID")]
    pub root: Option<String>,

    /// Print only the table of contents container
    #[arg(long = "fragment")]
    pub fragment: bool,

    /// Print the CSS selectors for styling the generated structure
    #[arg(long = "selectors")]
    pub selectors: bool,

    /// List the headings that were collected
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Show the generated table of contents as a tree
    #[arg(long = "tree")]
    pub tree: bool,

    /// Output format for --list and --tree modes
    ///
    ///   plain - Human-readable text (default)
    ///   json  - JSON for scripting
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}
