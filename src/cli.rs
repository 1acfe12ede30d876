//! Command line surface of the `tmps` binary.

use std::path::PathBuf;

use clap::Parser;
use tmps::{Action, Config, LayerExt, NativeFs, Request, Session, TmpsError, TracingLayer};

const EXAMPLES: &str = r#"Environment is mandatory: dev, val, inf or fr.

Actions:
  get     list files as JSON; with -k, only that file
  post    create a file from -j (the name comes from the JSON)
  put     change the mode of file -k from -j (the JSON name must equal -k)
  delete  delete file -k

JSON format:
  {"env": "<env>", "mode": "0<nnn>", "name": "<name>"}

  <env>   must equal the -e environment
  <nnn>   must match [267][1-7]{2} (0644, 0755, 0632...)
  <name>  must match \w+

Examples:
  tmps -e dev -a post -j '{"env":"dev","mode":"0644","name":"Maurice"}'
      creates /tmp/tmps/dev/Maurice with mode 0644
  tmps -e dev -a get
      lists files in /tmp/tmps/dev
  tmps -e dev -a put -j '{"env":"dev","mode":"0755","name":"Maurice"}' -k Maurice
      changes the mode of Maurice to 0755
  tmps -e dev -a get -k Maurice
      shows /tmp/tmps/dev/Maurice
  tmps -e dev -a delete -k Maurice
      deletes Maurice"#;

/// List, create, update or delete files in /tmp/tmps/<env>.
#[derive(Debug, Parser)]
#[command(name = "tmps", version, after_long_help = EXAMPLES)]
pub struct Cli {
    /// Environment (dev, inf, val or fr)
    #[arg(short, long)]
    pub env: String,

    /// Action to perform
    #[arg(short, long, value_enum)]
    pub action: Action,

    /// JSON content
    #[arg(short, long)]
    pub json: Option<String>,

    /// Primary key (name of the file)
    #[arg(short = 'k', long)]
    pub pk: Option<String>,

    /// Root directory holding one directory per environment
    #[arg(long, env = "TMPS_ROOT", default_value = tmps::DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Log more to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Run one invocation, printing the JSON result to stdout.
///
/// The argument shape is checked before anything touches the filesystem.
pub fn run(cli: Cli) -> Result<(), TmpsError> {
    let request = Request::new(cli.action, cli.json, cli.pk);
    request.check_shape()?;

    let backend = NativeFs::new().layer(TracingLayer::new());
    let session = Session::open(backend, Config::new(cli.root), &cli.env)?;
    let outcome = session.execute(&request)?;
    if let Some(json) = outcome.to_json()? {
        println!("{json}");
    }
    Ok(())
}
