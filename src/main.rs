//! # htmltoc
//!
//! Insert a table of contents into an HTML document, built from its headings.
//!
//! ## Usage
//!
//! Print the document with a generated table of contents:
//! ```sh
//! htmltoc page.html
//! ```
//!
//! Print only the generated container:
//! ```sh
//! htmltoc --fragment page.html
//! ```
//!
//! Show the table of contents as a tree:
//! ```sh
//! htmltoc --tree page.html
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use htmltoc::dom::NodeId;
use htmltoc::{
    ArenaDocument, Config, TocBuilder, TocOptions, TocRegistry, parse_html, read_outline,
};
use std::process;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    cli::logging::init_logging(args.verbose);

    let config = Config::load();

    let input_source = match htmltoc::input::determine_input_source(args.file.as_deref()) {
        Ok(source) => source,
        Err(htmltoc::input::InputError::NoTty) => {
            eprintln!("Error: HTML file argument is required");
            eprintln!("\nUsage: htmltoc [OPTIONS] <FILE>");
            eprintln!("       htmltoc [OPTIONS] -");
            eprintln!("       cat page.html | htmltoc [OPTIONS]");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            process::exit(1);
        }
    };

    let html = match htmltoc::input::process_input(input_source) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error processing input: {}", e);
            process::exit(1);
        }
    };

    let mut doc = parse_html(&html);

    // CLI flags override the config file
    let mut options = TocOptions::default()
        .with_headings(args.headings.clone().unwrap_or(config.toc.headings.clone()));
    if let Some(prefix) = args.prefix.clone().or(config.toc.prefix.clone()) {
        options = options.with_prefix(prefix);
    }
    if let Some(ref id) = args.container {
        options = options.with_container(find_element(&doc, id, "container"));
    }
    if let Some(ref id) = args.root {
        options = options.with_root(find_element(&doc, id, "root"));
    }

    let mut registry = TocRegistry::new();
    let toc = match registry.get_or_create(&mut doc, options) {
        Ok(toc) => toc,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    toc.borrow_mut().generate(&mut doc);

    let toc = toc.borrow();
    if args.selectors {
        println!("{}", toc.describe_selectors());
    } else if args.list {
        print_headings(&toc, args.output)?;
    } else if args.tree {
        print_tree(&doc, &toc, args.output)?;
    } else if args.fragment || config.output.fragment {
        println!("{}", doc.outer_html(toc.container()));
    } else {
        println!("{}", doc.to_html());
    }

    Ok(())
}

fn find_element(doc: &ArenaDocument, id: &str, role: &str) -> NodeId {
    match doc.element_by_id(id) {
        Some(node) => node,
        None => {
            eprintln!("Error: no element with id '{}' for --{}", id, role);
            process::exit(1);
        }
    }
}

fn print_headings(toc: &TocBuilder<NodeId>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            for heading in toc.headings() {
                let prefix = "#".repeat(heading.level as usize);
                println!("{} {}", prefix, heading.text.trim());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(toc.headings())?);
        }
    }
    Ok(())
}

fn print_tree(doc: &ArenaDocument, toc: &TocBuilder<NodeId>, format: OutputFormat) -> Result<()> {
    let outline = read_outline(doc, toc.container());

    match format {
        OutputFormat::Plain => {
            for (i, entry) in outline.iter().enumerate() {
                let is_last = i == outline.len() - 1;
                print!("{}", entry.render_box_tree("", is_last));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outline)?);
        }
    }
    Ok(())
}
