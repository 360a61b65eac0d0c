use crate::args::ReportArgs;
use crate::commands::console::Console;
use crate::commands::{deliver, Delivered, Out};
use crate::model::ReflectionRecord;
use crate::{utils, Config, Result};
use anyhow::Context;
use std::io::{Read, Write};
use tracing::debug;

/// Reads the answers from a JSON file, or stdin, shows the summary and writes the document.
pub async fn report(config: Config, args: ReportArgs) -> Result<Out<Delivered>> {
    report_to(config, args, std::io::stdout()).await
}

pub(crate) async fn report_to<W>(config: Config, args: ReportArgs, out: W) -> Result<Out<Delivered>>
where
    W: Write,
{
    let json = match args.input() {
        Some(path) => {
            debug!("Reading answers from {}", path.display());
            utils::read(path).await?
        }
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("Unable to read the answers from stdin")?;
            s
        }
    };
    let answers = ReflectionRecord::from_json(&json)?;

    let symbol = config.currency().symbol().to_string();
    let mut console =
        Console::<std::io::Empty, W>::answers(answers, out, symbol, args.render().link());
    deliver(&config, args.render(), &mut console).await
}
