//! Co compiler CLI

use std::path::Path;
use std::sync::Arc;

use co_diagnostic::DiagLevel;
use co_ir::Pos;
use coc::{BuildConfig, BuildContext, Universe};

fn main() {
    coc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "load" => {
            let mut config = BuildConfig::default();
            let mut paths = Vec::new();
            for arg in args.iter().skip(2) {
                if arg == "--opt" {
                    config.opt = true;
                } else if arg == "--debug" {
                    config.debug = true;
                } else if arg == "--no-safe" {
                    config.safe = false;
                } else if let Some(level) = arg.strip_prefix("--diag=") {
                    match level.parse::<DiagLevel>() {
                        Ok(level) => config.diag_level = level,
                        Err(e) => {
                            eprintln!("error: {e}");
                            std::process::exit(1);
                        }
                    }
                } else if arg.starts_with('-') {
                    eprintln!("error: unknown option {arg}");
                    std::process::exit(1);
                } else {
                    paths.push(arg.as_str());
                }
            }
            if paths.is_empty() {
                eprintln!("Usage: coc load <path>... [options]");
                std::process::exit(1);
            }
            std::process::exit(load(config, &paths));
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("error: unknown command {other:?}");
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Load every path into one package and report what was found.
fn load(config: BuildConfig, paths: &[&str]) -> i32 {
    let universe = match Universe::new() {
        Ok(u) => Arc::new(u),
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    let mut ctx = match BuildContext::new(&universe, config, "main") {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    ctx.set_handler(|d| tracing::debug!(level = %d.level, "{}", d.message));

    for path in paths {
        let added = if Path::new(path).is_dir() {
            ctx.add_dir(path)
        } else {
            ctx.add_file(path).map(|_| 1)
        };
        if let Err(e) = added {
            ctx.errf(Pos::NONE, format_args!("{e}"));
        }
    }

    // report in the order given
    let mut sources: Vec<_> = ctx.sources().cloned().collect();
    sources.reverse();
    let mut bytes = 0u64;
    for source in &sources {
        let origin = ctx.posmap.origin(source);
        let at = Pos::new(origin, 1, 1, 0);
        match source.line_offsets() {
            Ok(lines) => {
                bytes += u64::from(source.len());
                let nlines = lines.len();
                ctx.notef(at, format_args!("{nlines} lines, {} bytes", source.len()));
            }
            Err(e) => ctx.errf(at, format_args!("{e}")),
        }
        if source.body().is_ok_and(|b| std::str::from_utf8(b).is_err()) {
            ctx.warnf(at, format_args!("source is not valid UTF-8"));
        }
    }

    for d in ctx.diagnostics() {
        eprint!("{}", d.format(&ctx.posmap));
    }
    println!(
        "{}: {} sources, {} bytes, parse flags {:?}",
        ctx.pkgid,
        sources.len(),
        bytes,
        ctx.parse_flags()
    );

    i32::from(ctx.errcount() > 0)
}

fn print_usage() {
    println!("Co compiler");
    println!();
    println!("Usage: coc <command> [options]");
    println!();
    println!("Commands:");
    println!("  load <path>...    Load source files and directories into a package");
    println!("  help              Show this message");
    println!();
    println!("Options:");
    println!("  --opt             Build with optimizations");
    println!("  --debug           Include debug information");
    println!("  --no-safe         Disable runtime safety checks");
    println!("  --diag=<level>    Report diagnostics up to error, warn or note (default note)");
    println!();
    println!("Set RUST_LOG=coc=debug for trace output.");
}
