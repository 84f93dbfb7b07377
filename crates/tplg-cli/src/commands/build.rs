use std::path::PathBuf;

use tplg_compiler::Topology;

pub struct BuildArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbose: bool,
    pub color: bool,
}

pub fn run(args: BuildArgs) {
    let mut topology = Topology::new();
    topology.set_verbose(args.verbose);

    let result = topology.build_file(&args.input, &args.output);

    if !topology.diagnostics().is_empty() {
        eprint!("{}", topology.render_diagnostics(args.color));
    }

    match result {
        Ok(blocks) => {
            tracing::info!(
                output = %args.output.display(),
                blocks = blocks.len(),
                "topology written"
            );
        }
        Err(err) => {
            // Input errors were rendered above with their spans.
            if err.diagnostics().is_none() {
                eprintln!("error: {}", err);
            }
            if err.is_internal() {
                eprintln!(
                    "error: `{}` is corrupt and must be discarded",
                    args.output.display()
                );
            }
            tracing::debug!(errno = err.errno(), "build failed");
            std::process::exit(1);
        }
    }
}
