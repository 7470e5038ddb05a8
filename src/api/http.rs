use crate::api::{Endpoint, Routes};
use crate::error::SubmissionError;
use crate::form::data::FormData;
use tracing::debug;
use ureq::{Agent, AgentBuilder};

const CONTENT_TYPE: &str = "application/json";

/// [`Endpoint`] backed by a blocking `ureq` agent. No client-side timeout is
/// configured, so a request runs until the transport gives up.
pub struct HttpEndpoint {
    agent: Agent,
    routes: Routes,
}

impl HttpEndpoint {
    pub fn new(routes: Routes) -> Self {
        Self {
            agent: AgentBuilder::new().build(),
            routes,
        }
    }

    fn post_json(&self, url: &str, body: &str) -> Result<u16, SubmissionError> {
        debug!(url, bytes = body.len(), "POST");
        match self
            .agent
            .post(url)
            .set("Content-Type", CONTENT_TYPE)
            .send_string(body)
        {
            Ok(response) => Ok(response.status()),
            Err(ureq::Error::Status(status, _response)) => {
                Err(SubmissionError::Rejected { status })
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(SubmissionError::Transport(transport.to_string()))
            }
        }
    }
}

impl Endpoint for HttpEndpoint {
    fn track_visit(&self) -> Result<(), SubmissionError> {
        self.post_json(&self.routes.track_visit(), "{}").map(|_| ())
    }

    fn submit_application(&self, data: &FormData) -> Result<(), SubmissionError> {
        let body = data.to_json()?;
        let status = self.post_json(&self.routes.application(), &body)?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(SubmissionError::Rejected { status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HttpEndpoint;
    use crate::api::{Endpoint, Routes};
    use crate::error::SubmissionError;
    use crate::form::data::{FieldName, FormData};
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    struct Captured {
        request_line: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl Captured {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        }
    }

    /// Accepts one connection, records the request and answers with `status_line`.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("addr"));
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((key, value)) = line.split_once(':') {
                    headers.push((key.trim().to_string(), value.trim().to_string()));
                }
            }

            let length = headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.parse::<usize>().ok())
                .unwrap_or(0);
            let mut raw = vec![0u8; length];
            reader.read_exact(&mut raw).expect("body");

            let mut stream = stream;
            write!(
                stream,
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .expect("respond");
            stream.flush().expect("flush");

            Captured {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8(raw).expect("utf8 body"),
            }
        });
        (base, handle)
    }

    fn sample() -> FormData {
        let mut data = FormData::new();
        data.set(FieldName::HrName, "  Dana Reyes ");
        data.set(FieldName::Phone, "1234567890");
        data.set(FieldName::Email, "dana@acme.io");
        data.set(FieldName::Organization, "Acme ");
        data.set(FieldName::Role, "SRE");
        data.set(FieldName::Description, " pager duty ");
        data
    }

    #[test]
    fn submission_posts_form_verbatim_as_json() {
        let (base, server) = serve_once("HTTP/1.1 201 Created", "");
        let endpoint = HttpEndpoint::new(Routes::new(base));

        let data = sample();
        assert_eq!(endpoint.submit_application(&data), Ok(()));

        let captured = server.join().expect("server");
        assert_eq!(captured.request_line, "POST /api/application HTTP/1.1");
        assert_eq!(captured.header("content-type"), Some("application/json"));
        let sent: FormData = serde_json::from_str(&captured.body).expect("json body");
        assert_eq!(sent, data);
    }

    #[test]
    fn server_error_detail_is_discarded() {
        let (base, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error",
            "{\"error\":\"db down\"}",
        );
        let endpoint = HttpEndpoint::new(Routes::new(base));

        let err = endpoint.submit_application(&sample()).expect_err("rejected");
        assert_eq!(err, SubmissionError::Rejected { status: 500 });
        assert_eq!(err.to_string(), "Failed to submit application");
        server.join().expect("server");
    }

    #[test]
    fn visit_ping_sends_empty_object() {
        let (base, server) = serve_once("HTTP/1.1 204 No Content", "");
        let endpoint = HttpEndpoint::new(Routes::new(format!("{base}/")));

        assert_eq!(endpoint.track_visit(), Ok(()));

        let captured = server.join().expect("server");
        assert_eq!(captured.request_line, "POST /api/track-visit HTTP/1.1");
        assert_eq!(captured.header("Content-Type"), Some("application/json"));
        assert_eq!(captured.body, "{}");
    }

    #[test]
    fn unreachable_endpoint_is_a_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let endpoint = HttpEndpoint::new(Routes::new(format!("http://127.0.0.1:{port}")));

        match endpoint.submit_application(&sample()) {
            Err(SubmissionError::Transport(message)) => assert!(!message.is_empty()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
