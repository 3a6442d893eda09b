#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use hubbank::domain::account::{Account, AccountId, Amount, Balance};
use hubbank::domain::transaction::Transaction;
use rand::Rng;
use rust_decimal::Decimal;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration as StdDuration;

pub fn account(id: AccountId, balance: Decimal) -> Account {
    Account {
        id,
        account_number: format!("{:09}", id * 111),
        owner_name: format!("Owner {id}"),
        balance: Balance::new(balance),
    }
}

pub fn transaction(id: i64, from: AccountId, to: AccountId, amount: Decimal) -> Transaction {
    Transaction {
        id,
        from_account_id: from,
        to_account_id: to,
        amount: Amount::new(amount).expect("positive amount"),
        timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::minutes(id),
    }
}

/// Random transfers between accounts 1..=accounts, each with cents precision.
pub fn random_transactions(count: usize, accounts: AccountId) -> Vec<Transaction> {
    let mut rng = rand::thread_rng();
    (1..=count as i64)
        .map(|id| {
            let from = rng.gen_range(1..=accounts);
            let mut to = rng.gen_range(1..=accounts);
            while to == from {
                to = rng.gen_range(1..=accounts);
            }
            let cents: i64 = rng.gen_range(1..=1_000_000);
            transaction(id, from, to, Decimal::new(cents, 2))
        })
        .collect()
}

/// Minimal HTTP/1.1 backend serving canned `(status, body)` responses in
/// order, one per connection. Raw requests are kept for assertions.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start(responses: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let request = read_request(&stream);
                recorded.lock().unwrap().push(request);
                let mut stream = stream;
                let _ = write!(
                    stream,
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &TcpStream) -> String {
    stream
        .set_read_timeout(Some(StdDuration::from_secs(5)))
        .unwrap();
    let mut reader = BufReader::new(stream);
    let mut request = String::new();
    let mut content_length = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
        request.push_str(&line);
        if line == "\r\n" {
            break;
        }
    }
    let mut body = vec![0; content_length];
    if reader.read_exact(&mut body).is_ok() {
        request.push_str(&String::from_utf8_lossy(&body));
    }
    request
}
