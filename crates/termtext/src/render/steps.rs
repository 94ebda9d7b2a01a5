//! Output produced by each render step.
//!
//! Every function here writes to the sink and returns only write errors.
//! Body read failures and JSON failures are reported inline.

use std::error::Error;
use std::io::{self, Write};

use crate::http::{status_role, BodyError, EmbeddedMessage, HttpResponse};
use crate::profile::Profile;
use crate::tabular::TabWriter;
use crate::util::{bracket_list, indent_json};

pub(crate) fn nil_response(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Nil HTTP Response.")
}

pub(crate) fn error_line(
    out: &mut dyn Write,
    profile: &Profile,
    err: Option<&dyn Error>,
) -> io::Result<()> {
    match err {
        Some(err) => writeln!(out, "{}", profile.error_line(err)),
        None => Ok(()),
    }
}

/// Status table, header table, then the body.
pub(crate) fn full_http(
    out: &mut dyn Write,
    profile: &Profile,
    resp: Option<&mut HttpResponse>,
) -> io::Result<()> {
    let Some(resp) = resp else {
        return nil_response(out);
    };

    status_table(out, profile, resp)?;
    header_table(out, profile, resp)?;

    let no_content = resp.is_no_content();
    match resp.take_body() {
        Ok(_) if no_content => Ok(()),
        Ok(body) => pretty_body(out, profile, &body),
        Err(e) => body_read_error(out, profile, &e),
    }
}

/// One status line, then the body.
pub(crate) fn summary_http(
    out: &mut dyn Write,
    profile: &Profile,
    resp: Option<&mut HttpResponse>,
) -> io::Result<()> {
    let Some(resp) = resp else {
        return nil_response(out);
    };
    status_line(out, profile, resp)?;

    let no_content = resp.is_no_content();
    match resp.take_body() {
        Ok(_) if no_content => Ok(()),
        Ok(body) => pretty_body(out, profile, &body),
        Err(e) => body_read_error(out, profile, &e),
    }
}

/// One status line, then the message the body carries, if any.
pub(crate) fn embedded_message(
    out: &mut dyn Write,
    profile: &Profile,
    resp: Option<&mut HttpResponse>,
) -> io::Result<()> {
    let Some(resp) = resp else {
        return nil_response(out);
    };
    status_line(out, profile, resp)?;

    let no_content = resp.is_no_content();
    match resp.take_body() {
        Ok(body) if !no_content => match EmbeddedMessage::extract(&body) {
            Some(message) => message_line(out, profile, &message),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

/// Prints only the re-indented body.
pub(crate) fn raw_json(out: &mut dyn Write, resp: Option<&mut HttpResponse>) -> io::Result<()> {
    let Some(resp) = resp else {
        return nil_response(out);
    };

    let no_content = resp.is_no_content();
    match resp.take_body() {
        Ok(_) if no_content => Ok(()),
        Ok(body) => match indent_json(&body) {
            Ok(pretty) => writeln!(out, "{}", pretty),
            Err(_) => out.write_all(&body),
        },
        Err(e) => writeln!(out, "Body read error: {}", e),
    }
}

fn status_table(out: &mut dyn Write, profile: &Profile, resp: &HttpResponse) -> io::Result<()> {
    let mut tw = TabWriter::new(out, 4, 4, 3, ' ');
    tw.row([
        profile.title("Status"),
        profile.title("Length"),
        profile.title("Encoding"),
        profile.title("Uncompressed"),
    ])?;
    tw.row([
        profile.paint(status_role(resp.status_code()), resp.status()),
        profile.text(resp.get_content_length()),
        profile.text(bracket_list(resp.get_transfer_encoding())),
        profile.text(resp.is_uncompressed()),
    ])?;
    tw.flush()
}

fn header_table(out: &mut dyn Write, profile: &Profile, resp: &HttpResponse) -> io::Result<()> {
    let mut tw = TabWriter::new(out, 4, 4, 3, ' ');
    tw.row([profile.title("Header"), profile.title("Value")])?;
    for (name, values) in resp.headers() {
        tw.row([profile.text(name), profile.text(bracket_list(values))])?;
    }
    tw.flush()
}

fn body_read_error(out: &mut dyn Write, profile: &Profile, err: &BodyError) -> io::Result<()> {
    writeln!(out, "{} {}", profile.title("Body Read Error:"), profile.text(err))
}

fn status_line(out: &mut dyn Write, profile: &Profile, resp: &HttpResponse) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        profile.title("HTTP Response:"),
        profile.paint(status_role(resp.status_code()), resp.status())
    )
}

fn message_line(out: &mut dyn Write, profile: &Profile, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", profile.title("Message:"), profile.alert(message))
}

fn pretty_body(out: &mut dyn Write, profile: &Profile, body: &[u8]) -> io::Result<()> {
    match indent_json(body) {
        Ok(pretty) => {
            if let Some(message) = EmbeddedMessage::extract(body) {
                message_line(out, profile, &message)?;
            }
            writeln!(out, "{}", profile.title("RESP JSON Body:"))?;
            writeln!(out, "{}", profile.text(pretty))
        }
        Err(_) if body.is_empty() => Ok(()),
        Err(e) => {
            writeln!(out, "{} {}", profile.title("JSON indenting error:"), profile.fail(e))?;
            writeln!(out, "{}", profile.title("So here is the RESP body:"))?;
            writeln!(out, "{}", profile.text(String::from_utf8_lossy(body)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_full_http_tables() {
        let mut resp = HttpResponse::new(404)
            .header("X-Trace", "a")
            .header("Content-Type", "application/json")
            .body(r#"{"status":404,"message":"not found"}"#);
        let out = capture(|out| full_http(out, &Profile::no_color(), Some(&mut resp)));

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Status          Length   Encoding   Uncompressed");
        assert_eq!(lines[1], "404 Not Found   36       []         false");
        assert_eq!(lines[2], "Header         Value");
        assert_eq!(lines[3], "Content-Type   [application/json]");
        assert_eq!(lines[4], "X-Trace        [a]");
        assert_eq!(lines[5], "Message: not found");
        assert_eq!(lines[6], "RESP JSON Body:");
        assert_eq!(lines[7], "{");
        assert_eq!(lines[8], "  \"status\": 404,");
    }

    #[test]
    fn test_full_http_no_content_has_no_body_section() {
        let mut resp = HttpResponse::new(204).body("ignored");
        let out = capture(|out| full_http(out, &Profile::no_color(), Some(&mut resp)));
        assert!(out.ends_with("Header   Value\n"), "{out}");
        assert!(resp.take_body().is_err());
    }

    #[test]
    fn test_full_http_reports_consumed_body() {
        let mut resp = HttpResponse::new(200).body("{}");
        resp.take_body().unwrap();
        let out = capture(|out| full_http(out, &Profile::no_color(), Some(&mut resp)));
        assert!(out.ends_with("Body Read Error: body already consumed\n"), "{out}");
    }

    #[test]
    fn test_non_json_body_is_shown_raw() {
        let mut resp = HttpResponse::new(502).body("<html>bad gateway</html>");
        let out = capture(|out| summary_http(out, &Profile::no_color(), Some(&mut resp)));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "HTTP Response: 502 Bad Gateway");
        assert!(lines[1].starts_with("JSON indenting error: "));
        assert_eq!(lines[2], "So here is the RESP body:");
        assert_eq!(lines[3], "<html>bad gateway</html>");
    }

    #[test]
    fn test_summary_reports_body_read_error() {
        struct Reset;
        impl std::io::Read for Reset {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
            }
        }

        let mut resp = HttpResponse::new(200).reader(Reset);
        let out = capture(|out| summary_http(out, &Profile::no_color(), Some(&mut resp)));
        assert_eq!(out, "HTTP Response: 200 OK\nBody Read Error: connection reset\n");
    }

    #[test]
    fn test_empty_body_prints_nothing() {
        let mut resp = HttpResponse::new(200);
        let out = capture(|out| summary_http(out, &Profile::no_color(), Some(&mut resp)));
        assert_eq!(out, "HTTP Response: 200 OK\n");
    }

    #[test]
    fn test_embedded_message_only_shows_message() {
        let mut resp = HttpResponse::new(500).body(r#"{"message":"boom"}"#);
        let out = capture(|out| embedded_message(out, &Profile::no_color(), Some(&mut resp)));
        assert_eq!(out, "HTTP Response: 500 Internal Server Error\nMessage: boom\n");

        let mut resp = HttpResponse::new(500).body("plain");
        let out = capture(|out| embedded_message(out, &Profile::no_color(), Some(&mut resp)));
        assert_eq!(out, "HTTP Response: 500 Internal Server Error\n");
    }

    #[test]
    fn test_missing_response() {
        let profile = Profile::no_color();
        for out in [
            capture(|out| full_http(out, &profile, None)),
            capture(|out| summary_http(out, &profile, None)),
            capture(|out| embedded_message(out, &profile, None)),
            capture(|out| raw_json(out, None)),
        ] {
            assert_eq!(out, "Nil HTTP Response.\n");
        }
    }

    #[test]
    fn test_raw_json() {
        let mut resp = HttpResponse::new(200).body(r#"{"a":1}"#);
        assert_eq!(capture(|out| raw_json(out, Some(&mut resp))), "{\n  \"a\": 1\n}\n");

        let mut resp = HttpResponse::new(200).body("not json");
        assert_eq!(capture(|out| raw_json(out, Some(&mut resp))), "not json");

        let mut resp = HttpResponse::new(204).body(r#"{"a":1}"#);
        assert_eq!(capture(|out| raw_json(out, Some(&mut resp))), "");

        let mut resp = HttpResponse::new(200);
        resp.take_body().unwrap();
        assert_eq!(
            capture(|out| raw_json(out, Some(&mut resp))),
            "Body read error: body already consumed\n"
        );
    }

    #[test]
    fn test_error_line() {
        let err = io::Error::new(io::ErrorKind::Other, "boom");
        let out = capture(|out| error_line(out, &Profile::no_color(), Some(&err)));
        assert_eq!(out, "Error: boom\n");
        assert_eq!(capture(|out| error_line(out, &Profile::no_color(), None)), "");
    }
}
