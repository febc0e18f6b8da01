//! Interactive 7-option menu over the client service.
//!
//! All prompts read whitespace-delimited tokens. End of input ends the
//! loop as if the user chose Exit; operation errors are printed and the
//! loop continues.

use crate::input::TokenReader;
use clientbook_core::{ClientRepository, ClientService, Phone};
use std::io::{self, BufRead, Write};

/// Runs the menu loop until Exit or end of input.
pub fn run<R, W, Repo>(
    service: &mut ClientService<Repo>,
    input: &mut TokenReader<R>,
    out: &mut W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    Repo: ClientRepository,
{
    loop {
        writeln!(out, "1. Add New Client")?;
        writeln!(out, "2. Add Phone Number")?;
        writeln!(out, "3. Update Client")?;
        writeln!(out, "4. Delete Phone Number")?;
        writeln!(out, "5. Delete Client")?;
        writeln!(out, "6. Find Client")?;
        writeln!(out, "7. Exit")?;
        let Some(choice) = prompt(input, out, "Enter your choice: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => add_client(service, input, out)?,
            "2" => add_phone(service, input, out)?,
            "3" => update_client(service, input, out)?,
            "4" => delete_phone(service, input, out)?,
            "5" => delete_client(service, input, out)?,
            "6" => find_client(service, input, out)?,
            "7" => return Ok(()),
            _ => writeln!(out, "Invalid choice, please try again.")?,
        }
    }
}

fn prompt<R: BufRead, W: Write>(
    input: &mut TokenReader<R>,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    input.next_token()
}

/// Prompts for an integer; a parse failure aborts the current action.
fn prompt_number<R: BufRead, W: Write>(
    input: &mut TokenReader<R>,
    out: &mut W,
    label: &str,
) -> io::Result<Option<i64>> {
    let Some(token) = prompt(input, out, label)? else {
        return Ok(None);
    };
    match token.parse::<i64>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            writeln!(out, "Invalid number: {token}")?;
            Ok(None)
        }
    }
}

fn prompt_yes<R: BufRead, W: Write>(
    input: &mut TokenReader<R>,
    out: &mut W,
    label: &str,
) -> io::Result<bool> {
    match prompt(input, out, label)? {
        Some(answer) => Ok(answer.eq_ignore_ascii_case("y")),
        None => Ok(false),
    }
}

fn add_client<R: BufRead, W: Write, Repo: ClientRepository>(
    service: &mut ClientService<Repo>,
    input: &mut TokenReader<R>,
    out: &mut W,
) -> io::Result<()> {
    let Some(first_name) = prompt(input, out, "Enter first name: ")? else {
        return Ok(());
    };
    let Some(last_name) = prompt(input, out, "Enter last name: ")? else {
        return Ok(());
    };
    let Some(email) = prompt(input, out, "Enter email: ")? else {
        return Ok(());
    };

    let client = match service.add_client(&first_name, &last_name, &email) {
        Ok(client) => client,
        Err(err) => {
            writeln!(out, "Error adding client: {err}")?;
            return Ok(());
        }
    };
    writeln!(out, "Client added with ID: {}", client.id)?;

    if prompt_yes(
        input,
        out,
        "Do you want to add phone numbers for this client? (y/n): ",
    )? {
        add_phones_for_client(service, input, out, client.id)?;
    }
    Ok(())
}

fn add_phones_for_client<R: BufRead, W: Write, Repo: ClientRepository>(
    service: &mut ClientService<Repo>,
    input: &mut TokenReader<R>,
    out: &mut W,
    client_id: i64,
) -> io::Result<()> {
    loop {
        let Some(phone_number) = prompt(input, out, "Enter phone number: ")? else {
            return Ok(());
        };
        match service.add_phone_number(client_id, &phone_number) {
            Ok(()) => writeln!(out, "Phone number added.")?,
            Err(err) => writeln!(out, "Error adding phone number: {err}")?,
        }
        if !prompt_yes(
            input,
            out,
            "Do you want to add another phone number? (y/n): ",
        )? {
            return Ok(());
        }
    }
}

fn add_phone<R: BufRead, W: Write, Repo: ClientRepository>(
    service: &mut ClientService<Repo>,
    input: &mut TokenReader<R>,
    out: &mut W,
) -> io::Result<()> {
    let Some(client_id) = prompt_number(input, out, "Enter client ID: ")? else {
        return Ok(());
    };
    match service.client_profile(client_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            writeln!(out, "Client ID {client_id} does not exist.")?;
            return Ok(());
        }
        Err(err) => {
            writeln!(out, "Error adding phone number: {err}")?;
            return Ok(());
        }
    }

    let Some(phone_number) = prompt(input, out, "Enter phone number: ")? else {
        return Ok(());
    };
    match service.add_phone_number(client_id, &phone_number) {
        Ok(()) => writeln!(out, "Phone number added.")?,
        Err(err) => writeln!(out, "Error adding phone number: {err}")?,
    }
    Ok(())
}

fn update_client<R: BufRead, W: Write, Repo: ClientRepository>(
    service: &mut ClientService<Repo>,
    input: &mut TokenReader<R>,
    out: &mut W,
) -> io::Result<()> {
    let Some(client_id) = prompt_number(input, out, "Enter client ID to update: ")? else {
        return Ok(());
    };
    let profile = match service.client_profile(client_id) {
        Ok(profile) => profile,
        Err(err) => {
            writeln!(out, "Error updating client: {err}")?;
            return Ok(());
        }
    };
    let Some(profile) = profile else {
        writeln!(out, "Client ID {client_id} does not exist.")?;
        return Ok(());
    };

    let client = profile.client;
    writeln!(out, "Current data:")?;
    writeln!(out, "First Name: {}", client.first_name)?;
    writeln!(out, "Last Name: {}", client.last_name)?;
    writeln!(out, "Email: {}", client.email)?;

    let mut first_name = client.first_name;
    let mut last_name = client.last_name;
    let mut email = client.email;

    if prompt_yes(input, out, "Do you want to update first name? (y/n): ")? {
        if let Some(value) = prompt(input, out, "Enter new first name: ")? {
            first_name = value;
        }
    }
    if prompt_yes(input, out, "Do you want to update last name? (y/n): ")? {
        if let Some(value) = prompt(input, out, "Enter new last name: ")? {
            last_name = value;
        }
    }
    if prompt_yes(input, out, "Do you want to update email? (y/n): ")? {
        if let Some(value) = prompt(input, out, "Enter new email: ")? {
            email = value;
        }
    }

    match service.update_client(client_id, &first_name, &last_name, &email) {
        Ok(()) => writeln!(out, "Client updated.")?,
        Err(err) => {
            writeln!(out, "Error updating client: {err}")?;
            return Ok(());
        }
    }

    if prompt_yes(input, out, "Do you want to update phone numbers? (y/n): ")? {
        update_phones_for_client(service, input, out, client_id)?;
    }
    Ok(())
}

fn update_phones_for_client<R: BufRead, W: Write, Repo: ClientRepository>(
    service: &mut ClientService<Repo>,
    input: &mut TokenReader<R>,
    out: &mut W,
    client_id: i64,
) -> io::Result<()> {
    let phones = match service.client_profile(client_id) {
        Ok(Some(profile)) => profile.phones,
        Ok(None) => Vec::new(),
        Err(err) => {
            writeln!(out, "Error updating phones: {err}")?;
            return Ok(());
        }
    };
    if phones.is_empty() {
        writeln!(out, "No phone numbers found for this client.")?;
        return Ok(());
    }

    print_phone_list(out, &phones)?;
    let Some(phone_index) = prompt_number(input, out, "Enter phone index to update: ")? else {
        return Ok(());
    };
    let Some(phone_number) = prompt(input, out, "Enter new phone number: ")? else {
        return Ok(());
    };
    match service.update_phone_number(client_id, phone_index, &phone_number) {
        Ok(()) => writeln!(out, "Phone number updated.")?,
        Err(err) => writeln!(out, "Error updating phones: {err}")?,
    }
    Ok(())
}

fn delete_phone<R: BufRead, W: Write, Repo: ClientRepository>(
    service: &mut ClientService<Repo>,
    input: &mut TokenReader<R>,
    out: &mut W,
) -> io::Result<()> {
    let Some(client_id) = prompt_number(input, out, "Enter client ID: ")? else {
        return Ok(());
    };
    let phones = match service.client_profile(client_id) {
        Ok(Some(profile)) => profile.phones,
        Ok(None) => Vec::new(),
        Err(err) => {
            writeln!(out, "Error deleting phone number: {err}")?;
            return Ok(());
        }
    };
    if phones.is_empty() {
        writeln!(out, "No phones found for this client.")?;
        return Ok(());
    }

    print_phone_list(out, &phones)?;
    let Some(phone_index) = prompt_number(input, out, "Enter phone index to delete: ")? else {
        return Ok(());
    };
    match service.remove_phone_number(client_id, phone_index) {
        Ok(()) => writeln!(out, "Phone number deleted.")?,
        Err(err) => writeln!(out, "Error deleting phone number: {err}")?,
    }
    Ok(())
}

fn delete_client<R: BufRead, W: Write, Repo: ClientRepository>(
    service: &mut ClientService<Repo>,
    input: &mut TokenReader<R>,
    out: &mut W,
) -> io::Result<()> {
    let Some(client_id) = prompt_number(input, out, "Enter client ID to delete: ")? else {
        return Ok(());
    };
    match service.client_profile(client_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            writeln!(out, "Client ID {client_id} does not exist.")?;
            return Ok(());
        }
        Err(err) => {
            writeln!(out, "Error deleting client: {err}")?;
            return Ok(());
        }
    }
    match service.remove_client(client_id) {
        Ok(()) => writeln!(out, "Client deleted.")?,
        Err(err) => writeln!(out, "Error deleting client: {err}")?,
    }
    Ok(())
}

fn find_client<R: BufRead, W: Write, Repo: ClientRepository>(
    service: &mut ClientService<Repo>,
    input: &mut TokenReader<R>,
    out: &mut W,
) -> io::Result<()> {
    let Some(search_term) = prompt(
        input,
        out,
        "Enter search term (name, surname, email, or phone): ",
    )?
    else {
        return Ok(());
    };
    let matches = match service.find_clients(&search_term) {
        Ok(matches) => matches,
        Err(err) => {
            writeln!(out, "Error finding client: {err}")?;
            return Ok(());
        }
    };
    if matches.is_empty() {
        writeln!(out, "No clients found.")?;
        return Ok(());
    }

    writeln!(out, "Found clients:")?;
    for hit in &matches {
        writeln!(
            out,
            "ID: {}, Name: {} {}, Email: {}, Phone: {}",
            hit.client_id,
            hit.first_name,
            hit.last_name,
            hit.email,
            hit.phone_number.as_deref().unwrap_or("N/A")
        )?;
    }
    Ok(())
}

fn print_phone_list<W: Write>(out: &mut W, phones: &[Phone]) -> io::Result<()> {
    writeln!(out, "Current phone numbers:")?;
    for (position, phone) in phones.iter().enumerate() {
        writeln!(out, "{}. {}", position + 1, phone.phone_number)?;
    }
    Ok(())
}
