use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct GroupMember {
    pub uuid: String,
    pub username: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(rename = "isStaff", default)]
    pub is_staff: bool,
    #[serde(rename = "isVip", default)]
    pub is_vip: bool
}

#[derive(Deserialize, Debug, Clone)]
pub struct PermGroup {
    pub group: String,
    pub prefix: String,
    pub players: Vec<GroupMember>
}

/// Bulk permission listing: every group with its member list.
#[derive(Deserialize, Debug, Clone)]
pub struct GroupsResponse {
    pub count: u64,
    pub groups: Vec<PermGroup>
}

/// Single-group listing from the per-group endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct GroupResponse {
    pub group: String,
    pub prefix: String,
    pub players: Vec<GroupMember>
}

#[derive(Debug, Clone)]
pub struct PlayerGroup<'a> {
    pub group: &'a str,
    pub prefix: &'a str,
    pub member: &'a GroupMember
}

/// Scans the bulk listing for a player's group assignment. Groups are
/// visited in response order and the first case-insensitive username match
/// wins; a player listed in several groups gets the earliest one.
pub fn find_player_group<'a>(listing: &'a GroupsResponse, username: &str) -> Option<PlayerGroup<'a>> {
    for group in &listing.groups {
        if let Some(member) = group.players.iter()
            .find(|p| p.username.eq_ignore_ascii_case(username)) {
            return Some(PlayerGroup {
                group: group.group.as_str(),
                prefix: group.prefix.as_str(),
                member
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str) -> GroupMember {
        GroupMember {
            uuid: format!("uuid-{}", name),
            username: name.to_string(),
            group: None,
            is_staff: false,
            is_vip: false
        }
    }

    fn listing() -> GroupsResponse {
        GroupsResponse {
            count: 3,
            groups: vec![
                PermGroup {
                    group: "admin".to_string(),
                    prefix: "&c[Admin]".to_string(),
                    players: vec![member("Steve")]
                },
                PermGroup {
                    group: "vip".to_string(),
                    prefix: "&a[VIP]".to_string(),
                    players: vec![member("Alex"), member("Steve")]
                }
            ]
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let listing = listing();
        let found = find_player_group(&listing, "aLeX").unwrap();
        assert_eq!(found.group, "vip");
    }

    #[test]
    fn first_group_in_iteration_order_wins() {
        let listing = listing();
        let found = find_player_group(&listing, "Steve").unwrap();
        assert_eq!(found.group, "admin");
    }

    #[test]
    fn missing_player_yields_none() {
        let listing = listing();
        assert!(find_player_group(&listing, "Herobrine").is_none());
    }
}
