//! `random` - queue songs drawn at random from the catalog.

use crate::catalog::MAX_IDS_PER_REQUEST;
use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext, ResponseMessage};
use crate::commands::processor::CommandProcessor;
use crate::error::{CommandError, CommandResult};
use crate::events::Hub;
use crate::services::SongsService;
use async_trait::async_trait;
use jukebox_proto::{EventData, Song};
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Most songs one invocation may queue.
pub const MAX_RANDOM_SONGS: usize = MAX_IDS_PER_REQUEST;

pub struct RandomCommand {
    songs: Arc<SongsService>,
    hub: Arc<Hub>,
    title_limit: usize,
}

impl RandomCommand {
    pub fn new(songs: Arc<SongsService>, hub: Arc<Hub>, title_limit: usize) -> Self {
        Self {
            songs,
            hub,
            title_limit,
        }
    }
}

/// A leading integer is the amount; the rest are keywords.
fn amount_and_keywords<'a>(args: &[&'a str]) -> (i64, Vec<&'a str>) {
    match args.split_first() {
        Some((first, rest)) => match first.parse::<i64>() {
            Ok(amount) => (amount, rest.to_vec()),
            Err(_) => (1, args.to_vec()),
        },
        None => (1, Vec::new()),
    }
}

fn build_message(queued: &[Song], requested: usize, title_limit: usize) -> String {
    let mut lines = Vec::with_capacity(queued.len().min(title_limit) + 2);
    if queued.len() == requested {
        lines.push(format!("Added {} to the queue:", queued.len()));
    } else {
        lines.push(format!(
            "Added {} (of {} requested) to the queue:",
            queued.len(),
            requested
        ));
    }
    lines.extend(
        queued
            .iter()
            .take(title_limit)
            .map(|song| format!("- _{}_", song.name)),
    );
    if queued.len() > title_limit {
        lines.push(format!("+{} more", queued.len() - title_limit));
    }
    lines.join("\n")
}

#[async_trait]
impl CommandProcessor for RandomCommand {
    fn key(&self) -> &'static str {
        "random"
    }

    fn short_key(&self) -> Option<&'static str> {
        Some("r")
    }

    fn help_message(&self) -> &'static str {
        "Queues random songs from the catalog. Both parameters are optional; fewer songs than requested may be queued."
    }

    fn help_usages(&self) -> Option<&'static [&'static str]> {
        Some(&["<amount> <phrase>", "3", "britney", "3 britney", ""])
    }

    async fn execute(
        &self,
        command: &Command,
        ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let args = command.args_by_delimiter(' ');
        let (amount, keywords) = amount_and_keywords(&args);

        let amount = usize::try_from(amount)
            .ok()
            .filter(|amount| (1..=MAX_RANDOM_SONGS).contains(amount))
            .ok_or_else(|| {
                CommandError::user(format!(
                    "Random accepts between 1 and {MAX_RANDOM_SONGS} songs."
                ))
            })?;

        let mut matching: Vec<Song> = self
            .songs
            .get_all()
            .await?
            .into_iter()
            .filter(|song| song.matches_all_keywords(&keywords))
            .collect();

        if matching.is_empty() {
            return Err(CommandError::user("No songs match the given phrase."));
        }
        if amount > matching.len() {
            return Err(CommandError::user(format!(
                "Only {} songs match, cannot queue {amount}.",
                matching.len()
            )));
        }

        matching.shuffle(&mut rand::thread_rng());
        let available = self.songs.filter_embeddable(matching).await?;
        if available.is_empty() {
            return Err(CommandError::user("None of the matching songs can be played."));
        }

        let queued: Vec<Song> = available.into_iter().take(amount).collect();
        self.hub.broadcast(EventData::AddSongsToQueue {
            songs: queued.clone(),
        })?;

        super::count_plays(&self.songs, self.key(), &queued, &ctx.user).await;

        Ok(CommandProcessingResponse::new(
            vec![ResponseMessage::markdown(build_message(
                &queued,
                amount,
                self.title_limit,
            ))],
            false,
        ))
    }
}
