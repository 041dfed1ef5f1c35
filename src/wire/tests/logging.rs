// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[cfg(test)]
mod test {
    use cloudmgmt_wire::{Directives, Record, to_value};
    use serde_json::json;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    type Result = anyhow::Result<()>;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            let buffer = self.0.lock().expect("buffer lock is never poisoned");
            String::from_utf8_lossy(&buffer).into_owned()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .expect("buffer lock is never poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture<F, T>(f: F) -> (T, String)
    where
        F: FnOnce() -> T,
    {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, capture.contents())
    }

    #[derive(Debug, Default, Record)]
    pub struct Network {
        pub cidr: String,
        #[wire(directives)]
        pub directives: Directives,
    }

    #[test]
    fn unknown_directive() -> Result {
        let input = Network {
            directives: Directives::new().force("cidr_block"),
            ..Default::default()
        };
        let (got, logs) = capture(|| to_value(&input));
        assert_eq!(got?, json!({}));
        assert!(logs.contains("does not exist"), "{logs}");
        assert!(logs.contains("cidr_block"), "{logs}");
        Ok(())
    }

    #[test]
    fn conflicting_directives() -> Result {
        let input = Network {
            cidr: "10.0.0.0/8".into(),
            directives: Directives::new().force("cidr").null("cidr"),
        };
        let (got, logs) = capture(|| to_value(&input));
        assert_eq!(got?, json!({"cidr": null}));
        assert!(logs.contains("both forced and nulled"), "{logs}");
        Ok(())
    }

    #[test]
    fn field_decisions() -> Result {
        let input = Network {
            cidr: "10.0.0.0/8".into(),
            ..Default::default()
        };
        let (got, logs) = capture(|| to_value(&input));
        assert_eq!(got?, json!({"cidr": "10.0.0.0/8"}));
        assert!(logs.contains("SendValue"), "{logs}");
        assert!(logs.contains("Network"), "{logs}");
        Ok(())
    }
}
