//! Interactive menu loop over line-based input and output.
//!
//! # Responsibility
//! - Drive sign-up/log-in and the authenticated catalog menu.
//! - Coerce typed fields from free-form lines, re-prompting on bad numbers.
//!
//! # Invariants
//! - The session starts `Unauthenticated`; sign-up never logs in.
//! - Only `Log In` with valid credentials reaches `Authenticated`.
//! - End of input behaves like `Exit` in either state.
//! - Store failures end the loop with `SessionError::Repo`; user-level
//!   failures (validation, unknown id, taken username) are printed instead.

use crate::model::anime::{AnimeEntry, AnimeId, AnimeRecord};
use crate::repo::account_repo::AccountRepository;
use crate::repo::catalog_repo::CatalogRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::str::FromStr;

const MENU_HEADER: &str = "===== Anime Library Menu =====";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";
const INVALID_NUMBER: &str = "Please enter a valid non-negative number.";

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    Io(std::io::Error),
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console I/O failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Authentication state of the running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated { username: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// One interactive session bound to a pair of repositories.
pub struct Session<A, C, R, W> {
    accounts: A,
    catalog: C,
    input: R,
    output: W,
    state: SessionState,
}

impl<A, C, R, W> Session<A, C, R, W>
where
    A: AccountRepository,
    C: CatalogRepository,
    R: BufRead,
    W: Write,
{
    pub fn new(accounts: A, catalog: C, input: R, output: W) -> Self {
        Self {
            accounts,
            catalog,
            input,
            output,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs menus until the user exits or input ends.
    pub fn run(&mut self) -> SessionResult<()> {
        writeln!(self.output, "Welcome to the Anime Library!")?;
        info!("event=session_start module=session status=ok");

        loop {
            let step = match self.state {
                SessionState::Unauthenticated => self.top_level_step()?,
                SessionState::Authenticated { .. } => self.library_step()?,
            };
            if step == Step::Exit {
                break;
            }
        }

        writeln!(self.output, "Exiting the Anime Library.")?;
        self.output.flush()?;
        info!("event=session_end module=session status=ok");
        Ok(())
    }

    fn top_level_step(&mut self) -> SessionResult<Step> {
        writeln!(self.output, "\n{MENU_HEADER}")?;
        writeln!(self.output, "1. Sign Up")?;
        writeln!(self.output, "2. Log In")?;
        writeln!(self.output, "3. Exit")?;
        let Some(choice) = self.prompt("Enter your choice (1/2/3): ")? else {
            return Ok(Step::Exit);
        };

        match choice.trim() {
            "1" => self.sign_up(),
            "2" => self.log_in(),
            "3" => Ok(Step::Exit),
            _ => {
                writeln!(self.output, "{INVALID_CHOICE}")?;
                Ok(Step::Continue)
            }
        }
    }

    fn library_step(&mut self) -> SessionResult<Step> {
        writeln!(self.output, "\n{MENU_HEADER}")?;
        writeln!(self.output, "1. Add Anime")?;
        writeln!(self.output, "2. View Library")?;
        writeln!(self.output, "3. Search Anime")?;
        writeln!(self.output, "4. Update Anime")?;
        writeln!(self.output, "5. Delete Anime")?;
        writeln!(self.output, "6. Log Out")?;
        let Some(choice) = self.prompt("Enter your choice (1/2/3/4/5/6): ")? else {
            return Ok(Step::Exit);
        };

        match choice.trim() {
            "1" => self.add_anime(),
            "2" => self.view_library(),
            "3" => self.search_anime(),
            "4" => self.update_anime(),
            "5" => self.delete_anime(),
            "6" => {
                writeln!(self.output, "Logging out.")?;
                info!("event=logout module=session status=ok");
                self.state = SessionState::Unauthenticated;
                Ok(Step::Continue)
            }
            _ => {
                writeln!(self.output, "{INVALID_CHOICE}")?;
                Ok(Step::Continue)
            }
        }
    }

    fn sign_up(&mut self) -> SessionResult<Step> {
        let Some(username) = self.prompt("Enter a username: ")? else {
            return Ok(Step::Exit);
        };
        let Some(password) = self.prompt("Enter a password: ")? else {
            return Ok(Step::Exit);
        };

        match recoverable(self.accounts.create_user(&username, &password))? {
            Ok(user_id) => {
                info!("event=user_signup module=session status=ok user_id={user_id}");
                writeln!(self.output, "User created successfully!")?;
            }
            Err(RepoError::DuplicateUsername(name)) => {
                warn!("event=user_signup module=session status=rejected reason=duplicate_username");
                writeln!(self.output, "Username '{name}' is already taken.")?;
            }
            Err(err) => {
                warn!("event=user_signup module=session status=rejected reason=invalid_input");
                writeln!(self.output, "Error: {err}")?;
            }
        }
        Ok(Step::Continue)
    }

    fn log_in(&mut self) -> SessionResult<Step> {
        let Some(username) = self.prompt("Enter your username: ")? else {
            return Ok(Step::Exit);
        };
        let Some(password) = self.prompt("Enter your password: ")? else {
            return Ok(Step::Exit);
        };

        if self.accounts.authenticate(&username, &password)? {
            info!("event=login module=session status=ok");
            writeln!(self.output, "Welcome, {username}!")?;
            self.state = SessionState::Authenticated { username };
        } else {
            warn!("event=login module=session status=rejected");
            writeln!(
                self.output,
                "Invalid username or password. Please try again."
            )?;
        }
        Ok(Step::Continue)
    }

    fn add_anime(&mut self) -> SessionResult<Step> {
        let Some(record) = self.read_record(
            "Enter anime title: ",
            "Enter anime genre: ",
            "Enter the number of episodes: ",
        )?
        else {
            return Ok(Step::Exit);
        };

        match recoverable(self.catalog.add(&record))? {
            Ok(id) => {
                info!("event=anime_add module=session status=ok anime_id={id}");
                writeln!(self.output, "{} has been added to the library!", record.title)?;
            }
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Step::Continue)
    }

    fn view_library(&mut self) -> SessionResult<Step> {
        let entries = self.catalog.list_all()?;
        if entries.is_empty() {
            writeln!(self.output, "Anime library is empty.")?;
        } else {
            writeln!(self.output, "Anime Library:")?;
            self.write_entries(&entries)?;
        }
        Ok(Step::Continue)
    }

    fn search_anime(&mut self) -> SessionResult<Step> {
        let Some(keyword) = self.prompt("Enter the keyword to search: ")? else {
            return Ok(Step::Exit);
        };

        let results = self.catalog.search(&keyword)?;
        if results.is_empty() {
            writeln!(self.output, "No anime found with the given keyword.")?;
        } else {
            writeln!(self.output, "\nSearch Results:")?;
            self.write_entries(&results)?;
        }
        Ok(Step::Continue)
    }

    fn update_anime(&mut self) -> SessionResult<Step> {
        let Some(id) = self.prompt_number::<AnimeId>("Enter the ID of the anime to update: ")?
        else {
            return Ok(Step::Exit);
        };
        let Some(record) = self.read_record(
            "Enter the new anime title: ",
            "Enter the new anime genre: ",
            "Enter the new number of episodes: ",
        )?
        else {
            return Ok(Step::Exit);
        };

        match recoverable(self.catalog.update(id, &record))? {
            Ok(()) => {
                info!("event=anime_update module=session status=ok anime_id={id}");
                writeln!(self.output, "Anime information updated successfully!")?;
            }
            Err(RepoError::NotFound(id)) => {
                writeln!(self.output, "No anime found with ID {id}.")?;
            }
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Step::Continue)
    }

    fn delete_anime(&mut self) -> SessionResult<Step> {
        let Some(id) = self.prompt_number::<AnimeId>("Enter the ID of the anime to delete: ")?
        else {
            return Ok(Step::Exit);
        };

        match recoverable(self.catalog.delete(id))? {
            Ok(()) => {
                info!("event=anime_delete module=session status=ok anime_id={id}");
                writeln!(self.output, "Anime deleted successfully!")?;
            }
            Err(RepoError::NotFound(id)) => {
                writeln!(self.output, "No anime found with ID {id}.")?;
            }
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Step::Continue)
    }

    fn read_record(
        &mut self,
        title_prompt: &str,
        genre_prompt: &str,
        episodes_prompt: &str,
    ) -> SessionResult<Option<AnimeRecord>> {
        let Some(title) = self.prompt(title_prompt)? else {
            return Ok(None);
        };
        let Some(genre) = self.prompt(genre_prompt)? else {
            return Ok(None);
        };
        let Some(episode_count) = self.prompt_number::<u32>(episodes_prompt)? else {
            return Ok(None);
        };
        Ok(Some(AnimeRecord::new(title, genre, episode_count)))
    }

    fn write_entries(&mut self, entries: &[AnimeEntry]) -> SessionResult<()> {
        for entry in entries {
            writeln!(self.output, "{entry}")?;
        }
        Ok(())
    }

    /// Prints `prompt` and reads one line without its line terminator.
    ///
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, prompt: &str) -> SessionResult<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Reads a number, re-prompting until the line parses.
    fn prompt_number<T: FromStr>(&mut self, prompt: &str) -> SessionResult<Option<T>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{INVALID_NUMBER}")?,
            }
        }
    }
}

/// Separates errors the user can act on from store failures.
fn recoverable<T>(result: RepoResult<T>) -> SessionResult<Result<T, RepoError>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(
            err @ (RepoError::Validation(_)
            | RepoError::NotFound(_)
            | RepoError::DuplicateUsername(_)
            | RepoError::InvalidInput(_)),
        ) => Ok(Err(err)),
        Err(err) => Err(err.into()),
    }
}
