use std::path::PathBuf;

use tplg_abi::{TopologyFile, dump};
use tplg_core::Colors;

pub struct DumpArgs {
    pub binary: PathBuf,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let file = match TopologyFile::from_path(&args.binary) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("error: `{}`: {}", args.binary.display(), e);
            std::process::exit(1);
        }
    };

    if !args.json {
        print!("{}", dump(&file, Colors::new(args.color)));
        return;
    }

    let blocks = match file.decode_all() {
        Ok(blocks) => blocks,
        Err(e) => {
            eprintln!("error: `{}`: {}", args.binary.display(), e);
            std::process::exit(1);
        }
    };
    match serde_json::to_string_pretty(&blocks) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
