use crate::utils::{is_urlencoded, urlencode};

/// Query parameters of a request, in insertion order.
#[derive(Default, Clone, Debug)]
pub struct QueryMap(Vec<(String, String)>);

fn encode(text: &str) -> String {
    if is_urlencoded(text) {
        text.to_owned()
    } else {
        urlencode(text, false)
    }
}

impl QueryMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.0.push((key, value))
    }

    pub fn merge(&mut self, querys: Self) {
        self.0.extend(querys.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// get query string.
    /// the empty keys will be skipped.
    /// key and value will be uri encode.
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .filter(|(k, _)| !k.is_empty())
            .map(|(k, v)| {
                let (k, v) = (encode(k), encode(v));
                if v.is_empty() {
                    k
                } else {
                    format!("{k}={v}")
                }
            })
            .collect::<Vec<String>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::QueryMap;

    #[test]
    fn test_query_string() {
        let mut qm = QueryMap::new();
        qm.insert("replication".into(), "".into());
        qm.insert("".into(), "skipped".into());
        qm.insert("prefix".into(), "a b/".into());
        assert_eq!(qm.to_query_string(), "replication&prefix=a%20b%2F");
    }
}
