//! Pageflow CLI (for inspection only)
//! The main interface is through WASM bindings.
//!
//! Usage: `pageflow <file> [paper] [portrait|landscape]`
//! Set `RUST_LOG=debug` to see per-pass timing.

use pageflow::{Orientation, PageGeometryConfig, PaginatedDocument, PaperSize};
use std::process::ExitCode;

fn parse_orientation(arg: Option<&str>) -> Orientation {
    match arg {
        Some(value) if value.eq_ignore_ascii_case("landscape") => Orientation::Landscape,
        _ => Orientation::Portrait,
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = args.first().ok_or("missing input file")?;
    let paper = match args.get(1) {
        Some(name) => PaperSize::from_name(name)?,
        None => PaperSize::Letter,
    };
    let orientation = parse_orientation(args.get(2).map(String::as_str));

    let text = std::fs::read_to_string(path)?;
    let config = PageGeometryConfig::new(paper, orientation);
    let mut document = PaginatedDocument::with_config(config);
    document.replace_text(&text);

    let result = document.calculate_layout().clone();
    let geometry = document.engine().page_geometry();

    println!(
        "{}: {} characters, {} pages ({:?}, {:?})",
        path,
        result.character_count(),
        result.page_count,
        paper,
        orientation
    );
    println!(
        "content rect: {:.1}x{:.1} at ({:.1}, {:.1})",
        geometry.content_rect.width,
        geometry.content_rect.height,
        geometry.content_rect.x,
        geometry.content_rect.y
    );
    println!();
    println!("{:>5}  {:>15}  {:>15}  {:>10}  {:>9}", "page", "characters", "glyphs", "used h", "y");

    for page in &result.pages {
        println!(
            "{:>5}  {:>15}  {:>15}  {:>10.1}  {:>9.1}",
            page.page_index,
            format!("{}..{}", page.character_range.start, page.character_range.end),
            format!("{}..{}", page.glyph_range.start, page.glyph_range.end),
            page.used_rect.height,
            document.engine().y_position(page.page_index)
        );
    }

    println!();
    println!(
        "content size {:.1}x{:.1}, calculated in {:?}",
        result.content_size.width, result.content_size.height, result.calculation_time
    );

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("usage: pageflow <file> [paper] [portrait|landscape]");
            ExitCode::FAILURE
        }
    }
}
