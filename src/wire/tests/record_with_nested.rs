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
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};

    type Result = anyhow::Result<()>;

    #[derive(Clone, Debug, Default, Record)]
    pub struct Metadata {
        pub created_by: String,
        pub revision: i32,
        #[wire(directives)]
        pub directives: Directives,
    }

    #[derive(Clone, Debug, Default, Record)]
    pub struct Rule {
        pub protocol: String,
        pub port: Option<u16>,
        #[wire(directives)]
        pub directives: Directives,
    }

    #[derive(Clone, Debug, Default, Record)]
    pub struct Firewall {
        #[wire(flatten)]
        pub metadata: Metadata,
        pub name: String,
        pub default_rule: Option<Box<Rule>>,
        pub rules: Vec<Rule>,
        pub optional_rules: Vec<Option<Rule>>,
        pub tags: Vec<String>,
        pub labels: HashMap<String, String>,
        pub rules_by_zone: BTreeMap<String, Rule>,
        #[wire(skip)]
        pub etag: String,
        #[wire(directives)]
        pub directives: Directives,
    }

    #[test]
    fn omit_by_default() -> Result {
        assert_eq!(to_value(&Firewall::default())?, json!({}));
        Ok(())
    }

    #[test]
    fn embedded_fields_are_flattened() -> Result {
        let input = Firewall {
            metadata: Metadata {
                created_by: "admin".into(),
                ..Default::default()
            },
            name: "fw".into(),
            ..Default::default()
        };
        assert_eq!(to_value(&input)?, json!({"createdBy": "admin", "name": "fw"}));
        Ok(())
    }

    #[test]
    fn embedded_fields_use_own_directives() -> Result {
        let input = Firewall {
            metadata: Metadata {
                directives: Directives::new().force("revision").null("created_by"),
                ..Default::default()
            },
            // The parent directives do not apply to the embedded fields.
            directives: Directives::new().force("created_by"),
            ..Default::default()
        };
        assert_eq!(
            to_value(&input)?,
            json!({"revision": 0, "createdBy": null})
        );
        Ok(())
    }

    #[test]
    fn embedded_field_cannot_be_nulled_as_a_whole() -> Result {
        let input = Firewall {
            directives: Directives::new().null("metadata"),
            ..Default::default()
        };
        assert_eq!(to_value(&input)?, json!({}));
        Ok(())
    }

    #[test]
    fn forced_nested_record_is_not_fabricated() -> Result {
        let input = Firewall {
            directives: Directives::new().force("default_rule"),
            ..Default::default()
        };
        assert_eq!(to_value(&input)?, json!({}));
        Ok(())
    }

    #[test]
    fn nulled_nested_record() -> Result {
        let input = Firewall {
            default_rule: Some(Box::new(Rule {
                protocol: "tcp".into(),
                ..Default::default()
            })),
            directives: Directives::new().null("default_rule"),
            ..Default::default()
        };
        assert_eq!(to_value(&input)?, json!({"defaultRule": null}));
        Ok(())
    }

    #[test]
    fn nested_record_with_directives() -> Result {
        let input = Firewall {
            default_rule: Some(Box::new(Rule {
                directives: Directives::new().force("port").null("protocol"),
                ..Default::default()
            })),
            ..Default::default()
        };
        assert_eq!(
            to_value(&input)?,
            json!({"defaultRule": {"port": 0, "protocol": null}})
        );
        Ok(())
    }

    #[test]
    fn present_empty_nested_record() -> Result {
        let input = Firewall {
            default_rule: Some(Box::default()),
            ..Default::default()
        };
        assert_eq!(to_value(&input)?, json!({"defaultRule": {}}));
        Ok(())
    }

    #[test]
    fn collections() -> Result {
        let input = Firewall {
            rules: vec![
                Rule {
                    protocol: "tcp".into(),
                    port: Some(22),
                    ..Default::default()
                },
                Rule::default(),
            ],
            optional_rules: vec![None, Some(Rule::default())],
            tags: vec!["a".into(), String::new()],
            labels: HashMap::from([("env".to_string(), "prod".to_string())]),
            rules_by_zone: BTreeMap::from([(
                "zone-a".to_string(),
                Rule {
                    protocol: "udp".into(),
                    ..Default::default()
                },
            )]),
            ..Default::default()
        };
        let want = json!({
            "rules": [{"protocol": "tcp", "port": 22}, {}],
            "optionalRules": [null, {}],
            "tags": ["a", ""],
            "labels": {"env": "prod"},
            "rulesByZone": {"zone-a": {"protocol": "udp"}},
        });
        assert_eq!(to_value(&input)?, want);
        Ok(())
    }

    #[test]
    fn forced_empty_collections() -> Result {
        let input = Firewall {
            directives: Directives::new()
                .force("rules")
                .force("tags")
                .force("labels")
                .force("rules_by_zone"),
            ..Default::default()
        };
        let want = json!({"rules": [], "tags": [], "labels": {}, "rulesByZone": {}});
        assert_eq!(to_value(&input)?, want);
        Ok(())
    }

    #[test]
    fn nulled_collections() -> Result {
        let input = Firewall {
            tags: vec!["a".into()],
            directives: Directives::new().null("tags").null("labels"),
            ..Default::default()
        };
        assert_eq!(to_value(&input)?, json!({"tags": null, "labels": null}));
        Ok(())
    }

    #[test]
    fn skipped_fields() -> Result {
        let input = Firewall {
            etag: "abc".into(),
            directives: Directives::new().force("etag").null("etag"),
            ..Default::default()
        };
        assert_eq!(to_value(&input)?, json!({}));
        Ok(())
    }

    #[derive(Clone, Debug, Default, Record)]
    pub struct Page<T> {
        pub items: Vec<T>,
        pub next_page_token: String,
    }

    #[test]
    fn generic_record() -> Result {
        let input = Page {
            items: vec![Rule {
                protocol: "icmp".into(),
                ..Default::default()
            }],
            next_page_token: String::new(),
        };
        assert_eq!(to_value(&input)?, json!({"items": [{"protocol": "icmp"}]}));
        Ok(())
    }

    #[derive(Clone, Debug, Default, Record)]
    pub struct Recursive {
        pub name: String,
        pub children: Vec<Recursive>,
        pub parent: Option<Box<Recursive>>,
    }

    #[test]
    fn recursive_record() -> Result {
        let input = Recursive {
            name: "root".into(),
            children: vec![Recursive {
                name: "leaf".into(),
                ..Default::default()
            }],
            parent: None,
        };
        assert_eq!(
            to_value(&input)?,
            json!({"name": "root", "children": [{"name": "leaf"}]})
        );
        Ok(())
    }
}
