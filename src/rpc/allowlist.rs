use std::collections::HashSet;

/// Daemon methods the gateway lets through.
pub const DEFAULT_ALLOWED_METHODS: &[&str] = &[
    "getbestblockhash",
    "getblock",
    "getblockchaininfo",
    "getblockcount",
    "getblockhash",
    "getblockheader",
    "getchaintips",
    "getdifficulty",
    "getmempoolinfo",
    "getrawmempool",
    "gettxout",
    "gettxoutsetinfo",
    "getinfo",
    "getmininginfo",
    "getnetworkhashps",
    "submitblock",
    "getconnectioncount",
    "ping",
    "masternodelist",
    "getrawtransaction",
    "sendrawtransaction",
    "estimatefee",
    "estimatepriority",
];

/// Immutable, case-insensitive set of allowed method names.
#[derive(Debug, Clone)]
pub struct AllowedMethods {
    methods: HashSet<String>,
}

impl AllowedMethods {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            methods: methods.into_iter().map(|m| m.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains(&method.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_METHODS)
    }
}
