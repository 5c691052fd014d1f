use board_orders::{
    Completion, OrderId, ParseSortKeyError, ParseStatusFilterError, SortKey, StatusFilter,
};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::env::Env;
use crate::feed::OrderFeed;
use crate::render::render_board;
use crate::store::BoardStore;

const HELP: &str = "\
Commands:
  filter <All|Pending|Completed>   show only orders with that status
  sort <by_date|by_price>          order rows by date or price
  complete <id>                    mark a displayed pending order as completed
  show                             redraw the board
  help                             show this help
  quit                             leave";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: '{0}'. Type 'help' for the list of commands")]
    Unknown(String),
    #[error("Missing argument for '{command}': expected {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Filter(#[from] ParseStatusFilterError),
    #[error(transparent)]
    Sort(#[from] ParseSortKeyError),
}

#[derive(Debug, Parser)]
#[command(name = "order-board")]
#[command(about = "Browse, filter, sort and complete orders from a static order feed")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub env: Env,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Commands {
    /// Load the orders, print the board once and exit
    Show,
    /// Load the orders and read board commands from stdin (default)
    Interactive,
}

/// A single line of user input in an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    Filter(StatusFilter),
    Sort(SortKey),
    Complete(OrderId),
    Show,
    Help,
    Quit,
}

impl FromStr for BoardCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();

        match command {
            "filter" => {
                let value = argument.ok_or(CommandError::MissingArgument {
                    command: "filter",
                    expected: "All, Pending or Completed",
                })?;
                Ok(Self::Filter(value.parse()?))
            }
            "sort" => {
                let value = argument.ok_or(CommandError::MissingArgument {
                    command: "sort",
                    expected: "by_date or by_price",
                })?;
                let key = match value {
                    "date" => SortKey::ByDate,
                    "price" => SortKey::ByPrice,
                    other => other.parse()?,
                };
                Ok(Self::Sort(key))
            }
            "complete" => argument
                .map(|id| Self::Complete(OrderId::from(id)))
                .ok_or(CommandError::MissingArgument {
                    command: "complete",
                    expected: "an order id",
                }),
            "show" => Ok(Self::Show),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Interactive);
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    run_command_with_writers(cli.env, command, input, &mut std::io::stdout()).await
}

pub async fn run_command_with_writers<R, W>(
    env: Env,
    command: Commands,
    input: R,
    stdout: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!("Using order source {}", env.source);
    let feed = env.source.into_feed();
    let mut store = BoardStore::new(env.filter, env.sort);

    match command {
        Commands::Show => show_board(feed.as_ref(), &mut store, stdout).await?,
        Commands::Interactive => run_session(feed.as_ref(), &mut store, input, stdout).await?,
    }

    info!("Order board closed");
    Ok(())
}

/// Loads the orders and prints the board once.
pub async fn show_board<W: Write>(
    feed: &dyn OrderFeed,
    store: &mut BoardStore,
    stdout: &mut W,
) -> anyhow::Result<()> {
    info!("Fetching orders from {}", feed.describe());
    store.apply_fetch(feed.fetch_orders().await);
    render_board(store, stdout)?;
    Ok(())
}

/// Interactive board.
///
/// Renders once in the loading state, then handles the fetch result and input
/// lines as they arrive. When input runs out the outstanding fetch is still
/// awaited and rendered; `quit` drops it.
pub async fn run_session<R, W>(
    feed: &dyn OrderFeed,
    store: &mut BoardStore,
    input: R,
    stdout: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    render_board(store, stdout)?;
    writeln!(stdout, "Type 'help' for commands.")?;

    info!("Fetching orders from {}", feed.describe());
    let mut fetch = feed.fetch_orders();
    let mut fetched = false;
    let mut lines = input.lines();

    loop {
        tokio::select! {
            biased;

            result = &mut fetch, if !fetched => {
                fetched = true;
                store.apply_fetch(result);
                render_board(store, stdout)?;
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    if !fetched {
                        fetched = true;
                        store.apply_fetch((&mut fetch).await);
                        render_board(store, stdout)?;
                    }
                    break;
                };
                if let Flow::Quit = handle_line(store, &line, stdout)? {
                    break;
                }
            }
        }
    }

    if !fetched {
        info!("Session ended before orders loaded, dropping fetch");
    }
    Ok(())
}

fn handle_line<W: Write>(
    store: &mut BoardStore,
    line: &str,
    stdout: &mut W,
) -> anyhow::Result<Flow> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Flow::Continue);
    }

    let command = match line.parse::<BoardCommand>() {
        Ok(command) => command,
        Err(e) => {
            writeln!(stdout, "Error: {e}")?;
            return Ok(Flow::Continue);
        }
    };
    debug!("Board command: {command:?}");

    match command {
        BoardCommand::Filter(filter) => {
            if store.set_filter(filter) {
                render_board(store, stdout)?;
            } else {
                writeln!(stdout, "Filter is already {filter}")?;
            }
        }
        BoardCommand::Sort(sort) => {
            if store.set_sort(sort) {
                render_board(store, stdout)?;
            } else {
                writeln!(stdout, "Sort is already {sort}")?;
            }
        }
        BoardCommand::Complete(id) => match store.complete_displayed(&id) {
            Completion::Completed => render_board(store, stdout)?,
            Completion::AlreadyCompleted => writeln!(stdout, "Order {id} is already completed")?,
            Completion::NotFound => writeln!(stdout, "Order {id} is not on the board")?,
        },
        BoardCommand::Show => render_board(store, stdout)?,
        BoardCommand::Help => writeln!(stdout, "{HELP}")?,
        BoardCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}
