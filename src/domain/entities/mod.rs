pub mod customer;
pub mod project;
pub mod query;
pub mod team_member;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Customers,
    Projects,
    TeamMembers,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Customers,
        EntityKind::Projects,
        EntityKind::TeamMembers,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EntityKind::Customers => "customers",
            EntityKind::Projects => "projects",
            EntityKind::TeamMembers => "team",
        }
    }
}
