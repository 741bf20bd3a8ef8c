use std::{collections::HashMap, str::FromStr};

use percent_encoding::percent_decode_str;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RequestMethod {
    Get,
    Put,
    Delete,
}

impl FromStr for RequestMethod {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err("unsupported request method")
        }
    }
}

#[derive(Debug)]
pub struct Request {
    pub method: RequestMethod,
    pub path: String,
    pub headers: HashMap<String, String>,
}

impl FromStr for Request {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let request_line = lines.next().ok_or("empty request")?;
        let mut parts = request_line.split_whitespace();
        let (method, target) = match (parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(t), Some(_version)) => (m.parse()?, t),
            _ => return Err("malformed request line")
        };
        let raw_path = target.split('?').next().unwrap_or(target);
        let path = percent_decode_str(raw_path).decode_utf8_lossy().into_owned();
        // Header names are matched case-insensitively, so they are lowercased here
        let headers = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
            .collect();
        Ok(Request { method, path, headers })
    }
}

pub struct Response {
    status: u16,
    body: Vec<u8>,
}

pub trait Byteable {
    fn into_bytes(self) -> Vec<u8>;
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self { status, body: Vec::new() }
    }

    pub fn body<B: Into<Vec<u8>>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    fn status_text(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            _ => ""
        }
    }
}

impl Byteable for Response {
    fn into_bytes(self) -> Vec<u8> {
        let mut bytes = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
            self.status, self.status_text(), self.body.len()
        ).into_bytes();
        bytes.extend(self.body);
        bytes
    }
}
