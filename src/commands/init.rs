use std::io::{self, Write};

use crate::config::{parse_base_url, Config, Session, DEFAULT_API_URL};
use crate::error::{CollabError, Result};

fn ask(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = ask(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("CollabTree CLI Configuration");
    println!("============================\n");

    let api_url = ask(&format!("API URL [{DEFAULT_API_URL}]: "))?;
    let api_url = if api_url.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        parse_base_url(&api_url)?;
        api_url
    };

    let user_id = ask("Your user ID: ")?;
    if user_id.is_empty() {
        return Err(CollabError::NotAuthenticated);
    }

    let email = ask("Your email: ")?;
    let token = ask("API token [optional]: ")?;

    let config = Config {
        api_url: Some(api_url),
        session: Some(Session {
            user_id,
            email,
            token: (!token.is_empty()).then_some(token),
        }),
    };
    config.save_to(&config_path)?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'collabtree' commands!");

    Ok(())
}
