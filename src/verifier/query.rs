/// Which lookup a `/verify/nft` request asks for, resolved once from its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NftQuery {
    Owner {
        owner_address: String,
        token_id: Option<String>,
    },
    Collection {
        creator_address: String,
        collection_name: String,
        token_id: Option<String>,
    },
}

impl NftQuery {
    /// The owner takes precedence; otherwise both creator and collection are required.
    /// Empty strings count as absent. Returns `None` when underspecified.
    pub fn resolve(
        owner_address: Option<String>,
        creator_address: Option<String>,
        collection_name: Option<String>,
        token_id: Option<String>,
    ) -> Option<Self> {
        let token_id = present(token_id);

        if let Some(owner_address) = present(owner_address) {
            return Some(Self::Owner {
                owner_address,
                token_id,
            });
        }

        match (present(creator_address), present(collection_name)) {
            (Some(creator_address), Some(collection_name)) => Some(Self::Collection {
                creator_address,
                collection_name,
                token_id,
            }),
            _ => None,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
