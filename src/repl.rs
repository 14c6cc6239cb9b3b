// Interactive query loop.
// Reads hashtags line by line, resolves them through the cache, and prints the ranking.

use std::io::{BufRead, Write};

use tracing::warn;

use crate::cache::CacheStore;
use crate::error::{CotagError, Result};
use crate::ranker::find_top_three;
use crate::twitter::SearchFetcher;

pub const PROMPT: &str = "Please enter a hashtag(including #) you want to search(enter 'exit' to quit).";
pub const FAREWELL: &str = "Bye bye!";

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Search(String),
}

/// Parse one line of input, ignoring surrounding whitespace.
///
/// Anything other than `exit` must contain a `#`.
pub fn parse_input(line: &str) -> Result<Command> {
    let line = line.trim();
    if line == "exit" {
        Ok(Command::Exit)
    } else if line.contains('#') {
        Ok(Command::Search(line.to_string()))
    } else {
        Err(CotagError::InvalidHashtag(line.to_string()))
    }
}

/// Prompt loop that owns the cache and the fetcher for the session.
pub struct QueryLoop<F> {
    store: CacheStore,
    fetcher: F,
    baseurl: String,
    count: u32,
}

impl<F: SearchFetcher> QueryLoop<F> {
    pub fn new(store: CacheStore, fetcher: F, baseurl: impl Into<String>, count: u32) -> Self {
        Self {
            store,
            fetcher,
            baseurl: baseurl.into(),
            count,
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run until `exit` or end of input.
    ///
    /// Per-query failures are reported to `output` and the loop continues;
    /// only I/O errors on `input` or `output` end it early.
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        let mut lines = input.lines();

        loop {
            write!(output, "{} ", PROMPT)?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                writeln!(output, "{}", FAREWELL)?;
                return Ok(());
            };

            match parse_input(&line?) {
                Ok(Command::Exit) => {
                    writeln!(output, "{}", FAREWELL)?;
                    return Ok(());
                }
                Ok(Command::Search(hashtag)) => self.search(&hashtag, output).await?,
                Err(e) => writeln!(output, "{}", e)?,
            }
        }
    }

    /// Resolve one hashtag and print its top three co-occurring hashtags.
    async fn search<W: Write>(&mut self, hashtag: &str, output: &mut W) -> Result<()> {
        let query = hashtag.to_lowercase();
        let lookup = self
            .store
            .fetch_with_cache(&mut self.fetcher, &self.baseurl, &query, self.count)
            .await;

        let (response, status) = match lookup {
            Ok(found) => found,
            Err(e) => {
                warn!("Search for {} failed: {}", query, e);
                writeln!(output, "Search for {} failed: {}", hashtag, e)?;
                return Ok(());
            }
        };
        writeln!(output, "{}", status.message())?;

        match find_top_three(response, &query) {
            Ok(top) => writeln!(
                output,
                "Top Three commonly cooccurring hashtag with {} is {}.",
                hashtag, top
            )?,
            Err(CotagError::InsufficientData { found }) => writeln!(
                output,
                "Not enough data for {}: only {} co-occurring hashtag(s) found.",
                hashtag, found
            )?,
            Err(e) => {
                warn!("Could not rank results for {}: {}", query, e);
                writeln!(output, "Could not rank results for {}: {}", hashtag, e)?;
            }
        }

        Ok(())
    }
}
