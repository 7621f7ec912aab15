use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing_subscriber::EnvFilter;

use rudav::{blocking, DavConfig, Method, Scheme};

#[derive(Parser)]
#[command(name = "rudav", version, about = "WebDAV client and interactive shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Make a single WebDAV request to the given URL.
    Request {
        /// Request method (PROPFIND, GET, PUT, MKCOL, ...).
        method: Method,
        /// Absolute URL to send the request to.
        url: String,
        /// Extra headers as a JSON object, merged over the defaults.
        #[arg(long)]
        headers: Option<String>,
        /// Username for basic authentication.
        #[arg(short = 'u', long)]
        username: Option<String>,
        /// Password for basic authentication.
        #[arg(short = 'p', long)]
        password: Option<String>,
        /// Request body. Takes precedence over --body-file.
        #[arg(long)]
        body: Option<String>,
        /// Path to a file containing the request body.
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Start an interactive shell session against a host.
    Shell {
        /// Server host, e.g. demo.owncloud.com.
        #[arg(short = 'H', long)]
        host: String,
        /// Server port; defaults to 80/443 depending on the scheme.
        #[arg(long)]
        port: Option<u16>,
        /// Use plain http instead of https.
        #[arg(long)]
        http: bool,
        /// Username for basic authentication.
        #[arg(short = 'u', long)]
        username: Option<String>,
        /// Password for basic authentication.
        #[arg(short = 'p', long)]
        password: Option<String>,
        /// Extra path considered part of the base URL,
        /// e.g. remote.php/dav/files/USERNAME.
        #[arg(long)]
        path: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Request {
            method,
            url,
            headers,
            username,
            password,
            body,
            body_file,
        } => run_request(method, url, headers, username, password, body, body_file),
        Commands::Shell {
            host,
            port,
            http,
            username,
            password,
            path,
        } => run_shell(host, port, http, username, password, path),
    }
}

fn auth_pair(username: Option<String>, password: Option<String>) -> Result<Option<(String, String)>> {
    match (username, password) {
        (Some(u), Some(p)) => Ok(Some((u, p))),
        (None, None) => Ok(None),
        _ => bail!("both username and password must be passed"),
    }
}

fn run_request(
    method: Method,
    url: String,
    headers: Option<String>,
    username: Option<String>,
    password: Option<String>,
    body: Option<String>,
    body_file: Option<PathBuf>,
) -> Result<()> {
    let mut config = DavConfig::from_url(&url)?;
    if let Some((user, pass)) = auth_pair(username, password)? {
        config = config.basic_auth(user, pass);
    }

    let extra_headers = headers.map(|raw| parse_headers(&raw)).transpose()?;

    let body = match (body, body_file) {
        (Some(body), _) => Some(body.into_bytes()),
        (None, Some(path)) => Some(
            fs::read(&path).with_context(|| format!("cannot read body file {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let client = blocking::DavClient::new(config)?;
    let response = client.request_url(method, &url, extra_headers, body)?;

    println!("Status: {}\n", response.status_code());
    println!("{}", response.text());
    Ok(())
}

fn parse_headers(raw: &str) -> Result<HeaderMap> {
    let parsed: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(raw).context("--headers must be a JSON object")?;
    let mut headers = HeaderMap::new();
    for (key, value) in parsed {
        let value = value
            .as_str()
            .with_context(|| format!("header {key:?} must be a string"))?;
        headers.insert(
            key.parse::<HeaderName>()
                .with_context(|| format!("invalid header name {key:?}"))?,
            HeaderValue::from_str(value).with_context(|| format!("invalid value for {key:?}"))?,
        );
    }
    Ok(headers)
}

fn run_shell(
    host: String,
    port: Option<u16>,
    http: bool,
    username: Option<String>,
    password: Option<String>,
    path: Option<String>,
) -> Result<()> {
    let mut config = DavConfig::new(host);
    if http {
        config = config.scheme(Scheme::Http);
    }
    if let Some(port) = port {
        config = config.port(port);
    }
    if let Some((user, pass)) = auth_pair(username, password)? {
        config = config.basic_auth(user, pass);
    }
    if let Some(path) = path {
        config = config.base_path(path);
    }

    let session = blocking::Session::new(config)?;
    rudav::shell::run(session)?;
    Ok(())
}
