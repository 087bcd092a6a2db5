//! Interactive admin console: a numbered menu over the connector.
//!
//! This is glue for manual testing against a live instance. All behavior
//! lives in the connector; the console only prompts, parses, and prints.

use std::io::{self, BufRead, Write};

use crate::connector::{ApiResponse, Connector, ConnectorError, GroupEntry};

const MENU: &str = "\n 1 - login\n 2 - logout\n 3 - create user\n 4 - get user\n 5 - update user\n 6 - delete user\n 7 - create group\n 8 - get group\n 9 - add user to group\n10 - remove user from group\n11 - delete group\n12 - search user\n13 - all users\n14 - search group\n q - quit";

/// Runs the console loop until EOF or `q`.
///
/// # Errors
///
/// Returns an error string when stdin cannot be read.
pub fn run(mut connector: Connector) -> Result<(), String> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("{MENU}");
        let Some(selection) = prompt(&mut lines, "selection: ")? else { break };
        if selection.eq_ignore_ascii_case("q") {
            break;
        }
        match selection.parse::<u32>() {
            Ok(choice) => handle_selection(&mut connector, choice, &mut lines)?,
            Err(_) => println!("not a menu entry: {selection}"),
        }
    }
    Ok(())
}

/// Prints `prompt`, reads one trimmed line. `None` means EOF.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Result<Option<String>, String> {
    print!("{prompt}");
    io::stdout().flush().map_err(|e| format!("failed to flush stdout: {e}"))?;
    match lines.next() {
        Some(Ok(line)) => Ok(Some(line.trim().to_string())),
        Some(Err(e)) => Err(format!("failed to read input: {e}")),
        None => Ok(None),
    }
}

/// Splits a compound input line into exactly `expected` whitespace-separated
/// fields.
fn split_fields(line: &str, expected: usize) -> Result<Vec<String>, String> {
    let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if fields.len() == expected {
        Ok(fields)
    } else {
        Err(format!("expected {expected} fields, got {}", fields.len()))
    }
}

fn parse_number(value: &str, what: &str) -> Result<usize, String> {
    value.parse::<usize>().map_err(|_| format!("{what} must be a number, got: {value}"))
}

fn print_api(result: Result<ApiResponse, ConnectorError>) {
    match result {
        Ok(response) => println!("ok ({}): {}", response.status, response.body),
        Err(err) => println!("failed: {err}"),
    }
}

fn print_groups(result: Result<Vec<GroupEntry>, ConnectorError>) {
    match result {
        Ok(entries) if entries.is_empty() => println!("no groups"),
        Ok(entries) => {
            for entry in entries {
                println!("{}\t{}", entry.name, entry.html);
            }
        }
        Err(err) => println!("failed: {err}"),
    }
}

/// Prompts for a search query, exclusion, page, and limit.
fn prompt_search(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<(String, String, usize, usize)>, String> {
    let Some(query) = prompt(lines, "what to search for: ")? else { return Ok(None) };
    let Some(exclude) = prompt(lines, "what to exclude: ")? else { return Ok(None) };
    let Some(page) = prompt(lines, "what page: ")? else { return Ok(None) };
    let Some(limit) = prompt(lines, "what limit: ")? else { return Ok(None) };
    let page = parse_number(&page, "page")?;
    let limit = parse_number(&limit, "limit")?;
    Ok(Some((query, exclude, page, limit)))
}

#[allow(clippy::too_many_lines)]
fn handle_selection(
    connector: &mut Connector,
    choice: u32,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<(), String> {
    match choice {
        1 => {
            let Some(username) = prompt(lines, "username ")? else { return Ok(()) };
            let password = rpassword::prompt_password("password ")
                .map_err(|e| format!("failed to read password: {e}"))?;
            print_api(connector.login(&username, &password));
        }
        2 => print_api(connector.logout()),
        3 => {
            let Some(line) = prompt(lines, "username email displayname password ")? else {
                return Ok(());
            };
            match split_fields(&line, 4) {
                Ok(fields) => print_api(connector.create_user(
                    &fields[0],
                    &fields[1],
                    &fields[2],
                    &fields[3],
                )),
                Err(err) => println!("{err}"),
            }
        }
        4 => {
            let Some(username) = prompt(lines, "username ")? else { return Ok(()) };
            print_api(connector.get_user(&username));
        }
        5 => {
            let Some(line) = prompt(lines, "username name email [displayname] ")? else {
                return Ok(());
            };
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [username, name, email] => {
                    print_api(connector.update_user(username, name, email, None));
                }
                [username, name, email, display_name] => {
                    print_api(connector.update_user(username, name, email, Some(*display_name)));
                }
                _ => println!("expected 3 or 4 fields, got {}", fields.len()),
            }
        }
        6 => {
            let Some(username) = prompt(lines, "username ")? else { return Ok(()) };
            print_api(connector.delete_user(&username));
        }
        7 => {
            let Some(groupname) = prompt(lines, "groupname ")? else { return Ok(()) };
            print_api(connector.create_group(&groupname));
        }
        8 => {
            let Some(groupname) = prompt(lines, "groupname ")? else { return Ok(()) };
            print_api(connector.get_group(&groupname));
        }
        9 => {
            let Some(line) = prompt(lines, "username groupname ")? else { return Ok(()) };
            match split_fields(&line, 2) {
                Ok(fields) => print_api(connector.add_user_to_group(&fields[0], &fields[1])),
                Err(err) => println!("{err}"),
            }
        }
        10 => {
            let Some(line) = prompt(lines, "username groupname ")? else { return Ok(()) };
            match split_fields(&line, 2) {
                Ok(fields) => print_api(connector.remove_user_from_group(&fields[0], &fields[1])),
                Err(err) => println!("{err}"),
            }
        }
        11 => {
            let Some(groupname) = prompt(lines, "groupname ")? else { return Ok(()) };
            print_api(connector.delete_group(&groupname));
        }
        12 => {
            if let Some((query, exclude, page, limit)) = prompt_search(lines)? {
                print_api(connector.search_user(&query, &exclude, page, limit));
            }
        }
        13 => print_api(connector.all_users(1, 50)),
        14 => {
            if let Some((query, exclude, page, limit)) = prompt_search(lines)? {
                print_groups(connector.search_group(&query, &exclude, page, limit));
            }
        }
        _ => println!("NO BAD STOP! >:("),
    }
    Ok(())
}
