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
    use cloudmgmt_wire::error::DecodeError;
    use cloudmgmt_wire::{
        DecodeOptions, Directives, Record, decode_envelope, decode_item, decode_list,
        decode_list_with, decode_single, to_value,
    };
    use serde_json::json;
    use std::error::Error as _;

    type Result = anyhow::Result<()>;

    #[serde_with::serde_as]
    #[derive(Clone, Debug, Default, PartialEq, Record, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Volume {
        pub name: String,
        #[wire(string)]
        #[serde_as(as = "cloudmgmt_wire::internal::Lenient")]
        pub size_bytes: i64,
        pub attached: bool,
        #[serde(skip)]
        #[wire(directives)]
        pub directives: Directives,
    }

    fn volume(name: &str, size_bytes: i64) -> Volume {
        Volume {
            name: name.into(),
            size_bytes,
            ..Default::default()
        }
    }

    fn response(items: Vec<serde_json::Value>) -> Vec<u8> {
        let count = items.len();
        let body = json!({
            "request": {"method": "list"},
            "response": {
                "status": {"code": 200, "message": "OK"},
                "items": items,
                "count": count,
            }
        });
        serde_json::to_vec(&body).expect("test bodies are valid")
    }

    #[test]
    fn list_round_trip() -> Result {
        let want = vec![volume("v1", 1_i64 << 60), volume("v2", 0), volume("v3", 7)];
        let items = want
            .iter()
            .map(|v| to_value(v))
            .collect::<cloudmgmt_wire::Result<Vec<_>>>()?;
        let body = response(items);

        let envelope = decode_envelope(&body)?;
        assert_eq!(envelope.response.count, Some(3));
        let got = envelope
            .items()
            .iter()
            .map(|item| decode_item::<Volume>(item))
            .collect::<cloudmgmt_wire::Result<Vec<_>>>()?;
        assert_eq!(got.len() as u64, envelope.response.count.unwrap_or_default());
        assert_eq!(got, want);

        assert_eq!(decode_list::<Volume>(&body)?, want);
        assert_eq!(envelope.into_items::<Volume>()?, want);
        Ok(())
    }

    #[test]
    fn two_items_in_order() -> Result {
        let body = br#"{"response":{"items":[{"name":"first"},{"name":"second"}],"count":2}}"#;
        let got = decode_list::<Volume>(body)?;
        assert_eq!(got, vec![volume("first", 0), volume("second", 0)]);
        Ok(())
    }

    #[test]
    fn single_object() -> Result {
        let body = response(vec![json!({"name": "v1", "sizeBytes": "42", "attached": true})]);
        let got = decode_single::<Volume>(&body)?;
        let want = Volume {
            attached: true,
            ..volume("v1", 42)
        };
        assert_eq!(got, Some(want));

        let body = response(Vec::new());
        assert_eq!(decode_single::<Volume>(&body)?, None);
        Ok(())
    }

    #[test]
    fn bad_item_fails_the_list() {
        let body = response(vec![json!({"name": "ok"}), json!({"sizeBytes": "big"})]);
        let err = decode_list::<Volume>(&body).unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
        let source = err.source().and_then(|e| e.downcast_ref::<DecodeError>());
        assert!(
            matches!(source, Some(DecodeError::Item { index: 1, .. })),
            "{err:?}"
        );
    }

    #[test]
    fn heterogeneous_items() -> Result {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        #[serde(tag = "kind", rename_all = "snake_case")]
        enum Resource {
            Volume { name: String },
            Network { cidr: String },
        }
        let body = response(vec![
            json!({"kind": "volume", "name": "v1"}),
            json!({"kind": "network", "cidr": "10.0.0.0/8"}),
        ]);
        let got = decode_list::<Resource>(&body)?;
        assert_eq!(
            got,
            vec![
                Resource::Volume { name: "v1".into() },
                Resource::Network {
                    cidr: "10.0.0.0/8".into()
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn options() -> Result {
        let body = br#"{"response":{"status":{"code":"403","message":"denied"},"items":[],"count":5}}"#;
        let err = decode_list::<Volume>(body).unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");

        let options = DecodeOptions::default().set_verify_count(false);
        assert!(decode_list_with::<Volume>(body, &options)?.is_empty());

        let options = options.set_check_status(true);
        let err = decode_list_with::<Volume>(body, &options).unwrap_err();
        let status = err.status().expect("service error has a status");
        assert_eq!(status.code, 403);
        assert_eq!(status.message, "denied");
        Ok(())
    }
}
