use std::str::FromStr;

use clap::Parser;
use reqwest::Url;
use tokio::io::{AsyncBufReadExt, BufReader, stdin};

use crate::{
    cli::{locale::LocaleArgs, shell, source::SourceArgs},
    core::{
        controller::{Controller, ViewEvent},
        history::History,
        locale::Locale,
        provider::SlotSource,
        view_state::{Count, ViewState},
    },
    prelude::*,
};

#[derive(Parser)]
pub struct BrowseArgs {
    /// Initial address with the `view` and `count` query parameters.
    #[clap(long, env = "ADDRESS", default_value = "http://localhost:8000/")]
    address: Url,

    #[clap(flatten)]
    source: SourceArgs,

    #[clap(flatten)]
    locale: LocaleArgs,
}

impl BrowseArgs {
    pub async fn run(self) -> Result {
        let source = self.source.connect()?;
        let locale = self.locale.locale();

        let mut history = History::new(self.address);
        let mut navigation = history.subscribe();
        let mut controller = Controller::new(ViewState::decode(history.current()));
        shell::refresh(&mut controller, &*source, &locale).await;
        shell::render(&controller, history.current());
        println!("{}", Input::HELP);

        let mut lines = BufReader::new(stdin()).lines();
        while let Some(line) = lines.next_line().await.context("failed to read the input")? {
            let input = match line.parse::<Input>() {
                Ok(input) => input,
                Err(error) => {
                    warn!("{error:#}");
                    println!("{}", Input::HELP);
                    continue;
                }
            };
            match input {
                Input::Quit => break,
                Input::Help => println!("{}", Input::HELP),
                Input::Back => {
                    if !history.back() {
                        info!("nothing to go back to");
                    }
                }
                Input::Forward => {
                    if !history.forward() {
                        info!("nothing to go forward to");
                    }
                }
                Input::Details => {
                    controller.toggle_details();
                    shell::render(&controller, history.current());
                }
                Input::View(events) => {
                    act(&mut history, &mut controller, &*source, &locale, events).await?;
                    shell::render(&controller, history.current());
                }
            }

            while let Some(address) = navigation.try_next() {
                follow(&mut controller, &*source, &locale, &address).await;
                shell::render(&controller, &address);
            }
        }

        Ok(())
    }
}

/// Apply the user's events and push the new address once the view is fetched.
///
/// Returns `true` when the view got updated.
async fn act(
    history: &mut History,
    controller: &mut Controller,
    source: &dyn SlotSource,
    locale: &Locale,
    events: Vec<ViewEvent>,
) -> Result<bool> {
    for event in events {
        controller.apply(event);
    }
    let is_updated = shell::refresh(controller, source, locale).await;
    if is_updated {
        history.push(controller.state().encode(history.current())?);
    }
    Ok(is_updated)
}

/// Re-fetch the view for an address navigated to, the address is already in the history.
async fn follow(
    controller: &mut Controller,
    source: &dyn SlotSource,
    locale: &Locale,
    address: &Url,
) -> bool {
    controller.apply(ViewEvent::Navigated(ViewState::decode(address)));
    shell::refresh(controller, source, locale).await
}

/// Interactive command.
#[derive(Debug, Eq, PartialEq)]
enum Input {
    View(Vec<ViewEvent>),
    Back,
    Forward,
    Details,
    Help,
    Quit,
}

impl Input {
    const HELP: &str =
        "commands: all, cheapest [N], tomorrow [N], count N, back, forward, details, help, quit";
}

impl FromStr for Input {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("help");
        let count = words
            .next()
            .map(|count| {
                count.parse::<Count>().with_context(|| format!("`{count}` is not a positive count"))
            })
            .transpose()?;
        ensure!(words.next().is_none(), "too many arguments");
        let with_count = |event| {
            let mut events = vec![event];
            events.extend(count.map(ViewEvent::SetCount));
            Self::View(events)
        };
        let input = match (command, count) {
            ("all", None) => Self::View(vec![ViewEvent::ShowAll]),
            ("cheapest", _) => with_count(ViewEvent::ShowCheapest),
            ("tomorrow", _) => with_count(ViewEvent::ShowCheapestTomorrow),
            ("count", Some(count)) => Self::View(vec![ViewEvent::SetCount(count)]),
            ("back", None) => Self::Back,
            ("forward", None) => Self::Forward,
            ("details", None) => Self::Details,
            ("help", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            _ => bail!("unrecognised command: `{}`", line.trim()),
        };
        Ok(input)
    }
}
