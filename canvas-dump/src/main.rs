use std::path::PathBuf;

use anyhow::Result;
use app_utils::{init_from_env, init_tracing, InitFromEnv, ENV_FILE};
use canvas_dump::dump::{RawDumper, RAW_DATA_DIR};
use canvas_dump::run::dump_course;
use clap::{arg, command, value_parser, ArgMatches, Command};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let InitFromEnv { mut canvas } = init_from_env(&args.env_file)?;
    let dumper = RawDumper::new(args.out_dir);

    let written = dump_course(&mut canvas, &dumper).await?;
    info!(files = written.len(), dir = %dumper.dir().display(), "done");

    Ok(())
}

struct Args {
    env_file: PathBuf,
    out_dir: PathBuf,
}

impl Args {
    fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    fn command() -> Command {
        command!()
            .arg(
                arg!(--"env-file" <PATH> "Env file with the CANVAS_* variables")
                    .required(false)
                    .value_parser(value_parser!(PathBuf))
                    .default_value(ENV_FILE),
            )
            .arg(
                arg!(--"out-dir" <DIR> "Directory the raw JSON files are written to")
                    .required(false)
                    .value_parser(value_parser!(PathBuf))
                    .default_value(RAW_DATA_DIR),
            )
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let path = |id: &str| {
            matches
                .get_one::<PathBuf>(id)
                .cloned()
                .expect("argument has a default value")
        };

        Self {
            env_file: path("env-file"),
            out_dir: path("out-dir"),
        }
    }
}
