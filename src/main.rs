use std::{
    net::{TcpListener, TcpStream},
    io::{BufReader, BufRead, Write, Result as IoResult},
};

use threads::ThreadPool;

use http::{Request, Response};
use config::CONFIG;

use crate::http::{RequestMethod, Byteable};

mod config;
mod error;
mod http;
mod listing;
mod lookup;
mod threads;

fn main() -> IoResult<()> {
    println!("Starting up!");
    println!("Default metadata directory is {}", CONFIG.metadata.path.display());
    let listener = TcpListener::bind((CONFIG.net.ip, CONFIG.net.port))?;
    println!("Binding to {}:{}", CONFIG.net.ip, CONFIG.net.port);
    let pool = ThreadPool::new(CONFIG.net.threads.unwrap_or(10));

    for stream in listener.incoming() {
        let stream = stream.expect("connection failed!");

        pool.execute(|| {
            handle_connection(stream).expect("stream interrupted");
        });
    };
    Ok(())
}

fn handle_connection(mut stream: TcpStream) -> IoResult<()> {
    let buffer = BufReader::new(&mut stream);
    let request: String = buffer.lines()
        .map(Result::unwrap)
        .take_while(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\r\n");
    println!("Connection with request:\n{request}");
    if let Ok(request) = request.parse() {
        handle_request(request, stream)
    } else {
        stream.write_all(&Response::new(400).into_bytes())
    }
}

const API_METADATA: &str = "/api/v1/metadata";

fn handle_request(request: Request, mut stream: TcpStream) -> IoResult<()> {
    match request {
        Request{method: RequestMethod::Get, ref path, ..} if path == API_METADATA =>
            listing::handle_listing_request(stream),
        Request{method: RequestMethod::Get, path, headers} if path.starts_with(API_METADATA) =>
            lookup::handle_lookup_request(stream, get_metadata_name(&path), &headers),
        _ => stream.write_all(&Response::new(405).into_bytes())
    }
}

fn get_metadata_name(path: &str) -> &str {
    let name = path.strip_prefix(API_METADATA).expect("Have been checked in main module");
    name.strip_prefix('/').unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::get_metadata_name;
    #[test]
    fn metadata_name_from_path() {
        let requested_resource = "/api/v1/metadata/My Report";
        assert_eq!(get_metadata_name(requested_resource), "My Report");
    }
    #[test]
    #[should_panic]
    fn metadata_name_refuse_other_route() {
        let requested_resource = "/api/v2/stuff";
        let _ = get_metadata_name(requested_resource);
    }
}
