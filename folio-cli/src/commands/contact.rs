use anyhow::{bail, Result};
use colored::Colorize;
use folio_core::resume::provider_from_config;
use folio_core::{mailto_link, validate, ContactForm, FolioConfig};

pub async fn cmd_contact(
    config: &FolioConfig,
    name: String,
    email: String,
    message: String,
    to: Option<String>,
) -> Result<()> {
    let form = ContactForm::new(name, email, message);

    let errors = validate(&form);
    if !errors.is_empty() {
        println!("{}", "Please fix the following:".yellow().bold());
        for (field, error) in errors.iter() {
            println!("  {} {:<8} {}", "✗".red(), format!("{}:", field), error);
        }
        bail!("Contact form has {} invalid field(s)", errors.len());
    }

    let recipient = match to {
        Some(to) => to,
        None => {
            let provider = provider_from_config(config)?;
            match provider.load().await {
                Some(resume) => resume.contact.email,
                None => bail!(
                    "No recipient: resume unavailable from {}. Pass --to <address>",
                    provider.describe()
                ),
            }
        }
    };

    println!(
        "{} {}",
        "✓".green().bold(),
        "Message looks good. Open this link to send it:".green()
    );
    println!();
    println!("{}", mailto_link(&recipient, &form));

    Ok(())
}
