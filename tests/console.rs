//! End-to-end tests against an in-process stub of the admin console. The stub
//! scripts the login-token handshake and answers SQL posts with the same HTML
//! markers the real console emits.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use pma_migrate::{config::Config, driver::Outcome, seed, session::Session};

struct Request {
    line: String,
    headers: String,
    body: String,
}

impl Request {
    fn is(&self, method_and_path: &str) -> bool {
        self.line.starts_with(method_and_path)
    }
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|l| {
            let (name, value) = l.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    let (line, headers) = head.split_once("\r\n").unwrap_or((head.as_str(), ""));
    Some(Request {
        line: line.to_string(),
        headers: headers.to_string(),
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn http_ok(body: &str, extra_headers: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
        body.len(),
        extra_headers,
        body
    )
}

/// Serve scripted responses on a fresh port; returns the base URL.
fn spawn_console(handler: impl Fn(&Request) -> String + Send + 'static) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            if let Some(req) = read_request(&mut stream) {
                let _ = stream.write_all(handler(&req).as_bytes());
            }
        }
    });
    format!("http://{addr}")
}

fn test_config(base_url: String) -> Config {
    Config {
        base_url,
        username: "arbada".to_string(),
        password: "secret".to_string(),
        server: 1,
        database: "test".to_string(),
        accept_invalid_certs: false,
    }
}

const LOGIN_PAGE: &str =
    r#"<form method="post"><input type="hidden" name="token" value="abc123" /></form>"#;

fn console_handler(req: &Request) -> String {
    if req.is("GET /index.php") {
        return http_ok(LOGIN_PAGE, "");
    }
    if req.is("POST /index.php") {
        // reject a login that did not echo the form token
        if !req.body.contains("token=abc123") || !req.body.contains("pma_username=arbada") {
            return http_ok(LOGIN_PAGE, "");
        }
        return http_ok(
            r#"<script>var opts = {"token":"def456"};</script>"#,
            "Set-Cookie: pmaAuth=1; Path=/\r\n",
        );
    }
    if req.is("POST /sql.php") {
        // session affinity: the login cookie must come back on every request
        if !req.headers.to_lowercase().contains("pmaauth=1")
            || !req.body.contains("token=def456")
        {
            return http_ok(r#"<div class="error">No valid session</div>"#, "");
        }
        if req.body.contains("COUNT") {
            let n = if req.body.contains("articles") {
                34
            } else if req.body.contains("categories") {
                7
            } else if req.body.contains("comments") {
                4
            } else {
                3
            };
            return http_ok(&format!("<table><tr><td>{n}</td></tr></table>"), "");
        }
        if req.body.contains("SHOW") {
            return http_ok(
                "<td>articles</td><td>comments</td><td>categories</td><td>reporters</td>",
                "",
            );
        }
        return http_ok(r#"<div class="success">Query OK</div>"#, "");
    }
    http_ok("<html>not found</html>", "")
}

#[test]
fn seed_run_against_scripted_console() {
    let base_url = spawn_console(console_handler);
    let config = test_config(base_url);

    let session = Session::login(&config).expect("handshake should succeed");
    assert_eq!(session.token(), "def456");

    let summary = seed::run(&session, &config.database).expect("seed run should complete");

    assert_eq!(summary.tables.len(), 4);
    for (name, outcome) in &summary.tables {
        assert_eq!(*outcome, Outcome::Success, "table {name}");
    }
    assert_eq!(summary.articles_inserted, seed::attempted_articles());
    assert_eq!(summary.categories_inserted, 7);
    assert_eq!(summary.comments_inserted, 4);
    assert_eq!(summary.reporters_inserted, 3);
    // final row count matches the number of accepted inserts
    assert_eq!(summary.article_count, Some(summary.articles_inserted as u64));
}

#[test]
fn login_fails_without_a_page_token() {
    let base_url = spawn_console(|_| http_ok("<html>maintenance</html>", ""));
    let config = test_config(base_url);
    let err = Session::login(&config).unwrap_err();
    assert!(err.to_string().contains("no login token"));
}

#[test]
fn login_fails_when_no_post_login_token_appears() {
    let base_url = spawn_console(|req| {
        if req.is("GET /index.php") {
            http_ok(LOGIN_PAGE, "")
        } else {
            // bad credentials: the console just serves the login form again
            http_ok(LOGIN_PAGE, "")
        }
    });
    let config = test_config(base_url);
    let err = Session::login(&config).unwrap_err();
    assert!(err.to_string().contains("login may have failed"));
}

#[test]
fn import_uploads_dump_and_refreshes_token() {
    let base_url = spawn_console(|req| {
        if req.is("GET /index.php") {
            return http_ok(LOGIN_PAGE, "");
        }
        if req.is("POST /index.php") {
            return http_ok(
                r#"{"token":"def456"}"#,
                "Set-Cookie: pmaAuth=1; Path=/\r\n",
            );
        }
        if req.is("POST /import.php") {
            // multipart body carries the token field and the dump file name
            if !req.body.contains("def456") || !req.body.contains("migration.sql") {
                return http_ok(r#"<div class="error">No valid session</div>"#, "");
            }
            return http_ok(
                concat!(
                    r#"<div class="success"><img src="s.png"/>Import has been successfully finished, 2 queries executed.</div>"#,
                    r#"<a href="index.php?token=0123456789abcdef0123456789abcdef">home</a>"#,
                ),
                "",
            );
        }
        http_ok("<html>not found</html>", "")
    });
    let config = test_config(base_url);

    let mut session = Session::login(&config).expect("handshake should succeed");
    let dump = b"CREATE TABLE articles (id VARCHAR(50));\nINSERT INTO articles VALUES ('a');\n".to_vec();
    let result = session.import(dump, &config.database).expect("upload should complete");

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(
        result.messages,
        vec!["Import has been successfully finished, 2 queries executed.".to_string()]
    );
    assert_eq!(session.token(), "0123456789abcdef0123456789abcdef");
}
