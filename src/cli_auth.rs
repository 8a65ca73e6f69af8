use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use album_viewer_server::{SqliteUserStore, UserManager};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser)]
struct CliArgs {
    /// Directory holding user.db.
    #[clap(long, value_parser = parse_path)]
    db_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Creates a user with the given handle and password.
    AddUser {
        user_handle: String,
        password: String,
    },

    /// Sets the password of an existing user.
    SetPassword {
        user_handle: String,
        password: String,
    },

    /// Deletes a user together with its credentials and tokens.
    DeleteUser { user_handle: String },

    /// Prints every user handle with its number of active sessions.
    ListUsers,
}

fn open_user_manager(db_dir: &Path) -> Result<UserManager> {
    if !db_dir.is_dir() {
        anyhow::bail!("db_dir is not a directory: {:?}", db_dir);
    }
    let user_store = SqliteUserStore::new(db_dir.join("user.db"))
        .with_context(|| format!("Failed to open user store in {:?}", db_dir))?;
    Ok(UserManager::new(Box::new(user_store)))
}

fn execute(user_manager: &UserManager, command: Command) -> Result<()> {
    match command {
        Command::AddUser {
            user_handle,
            password,
        } => {
            let user_id = user_manager.add_user(&user_handle)?;
            user_manager.set_password(&user_handle, &password)?;
            println!("Created user {} with id {}.", user_handle, user_id);
        }
        Command::SetPassword {
            user_handle,
            password,
        } => {
            user_manager.set_password(&user_handle, &password)?;
            println!("Password of {} updated.", user_handle);
        }
        Command::DeleteUser { user_handle } => {
            user_manager.delete_user(&user_handle)?;
            println!("Deleted user {}.", user_handle);
        }
        Command::ListUsers => {
            for handle in user_manager.get_all_user_handles()? {
                let sessions = user_manager.get_user_tokens(&handle)?.len();
                println!("{} ({} active sessions)", handle, sessions);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let user_manager = open_user_manager(&cli_args.db_dir)?;
    execute(&user_manager, cli_args.command)
}
