use std::path::PathBuf;

use tplg_compiler::Topology;

pub struct CheckArgs {
    pub input: PathBuf,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let mut topology = Topology::new();
    let result = topology.parse_file(&args.input).and_then(|()| topology.link());

    let diagnostics = topology.diagnostics();
    let is_valid = if args.strict {
        result.is_ok() && !diagnostics.has_warnings()
    } else {
        result.is_ok()
    };

    if !diagnostics.is_empty() {
        eprint!("{}", topology.render_diagnostics(args.color));
    }
    if let Err(err) = &result
        && err.diagnostics().is_none()
    {
        eprintln!("error: {}", err);
    }

    if !is_valid {
        std::process::exit(1);
    }
}
