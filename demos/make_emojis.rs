//! Render all emoji variants for one image.
//!
//! Usage:
//! ```sh
//! cargo run --example make_emojis -- input.jpg out_dir
//! ```

use std::env;
use std::process;

use emoji_maker::{export, IntakeOutcome, Session, Upload};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input> <output_dir>", args[0]);
        process::exit(1);
    }

    let upload = Upload::from_path(args[1].as_ref()).expect("failed to read input");
    let mut session = Session::default();

    match session.submit(&upload) {
        Ok(IntakeOutcome::Rendered(n)) => println!("Rendered {n} variants"),
        Ok(IntakeOutcome::Ignored) => {
            eprintln!("Not an image: {}", upload.mime);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    let written = export::download_all(
        &session.variants(),
        args[2].as_ref(),
        export::DEFAULT_STAGGER,
    )
    .expect("failed to write variants");
    for path in written {
        println!("Done: {}", path.display());
    }
}
