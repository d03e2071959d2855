//! Recipient lists

/// One address or a list of addresses
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipients {
    /// A single address
    Single(String),

    /// Several addresses
    List(Vec<String>),
}

impl Recipients {
    /// Parses a stored, comma separated address field.
    ///
    /// Empty fields yield `None`; fields are only split when they contain a comma.
    pub fn from_address_list(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        if raw.contains(',') {
            Some(Self::List(raw.split(',').map(String::from).collect()))
        } else {
            Some(Self::Single(raw.to_string()))
        }
    }

    /// Iterates over the addresses
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let addresses: &[String] = match self {
            Self::Single(address) => std::slice::from_ref(address),
            Self::List(addresses) => addresses,
        };

        addresses.iter().map(String::as_str)
    }

    /// The addresses joined with commas
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(",")
    }
}

impl From<&str> for Recipients {
    fn from(address: &str) -> Self {
        Self::Single(address.to_string())
    }
}

impl From<String> for Recipients {
    fn from(address: String) -> Self {
        Self::Single(address)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(mut addresses: Vec<String>) -> Self {
        if addresses.len() == 1 {
            Self::Single(addresses.remove(0))
        } else {
            Self::List(addresses)
        }
    }
}
