use crate::args::RenderArgs;
use crate::commands::console::Console;
use crate::commands::{deliver, Delivered, Out};
use crate::{Config, Result};
use std::io::{BufRead, Write};

/// Asks every question on the terminal, shows the summary and writes the document.
pub async fn form(config: Config, args: RenderArgs) -> Result<Out<Delivered>> {
    let input = std::io::stdin().lock();
    form_with(config, args, input, std::io::stdout()).await
}

pub(crate) async fn form_with<R, W>(
    config: Config,
    args: RenderArgs,
    input: R,
    out: W,
) -> Result<Out<Delivered>>
where
    R: BufRead,
    W: Write,
{
    let symbol = config.currency().symbol().to_string();
    let mut console = Console::prompt(input, out, symbol, args.link());
    deliver(&config, &args, &mut console).await
}
