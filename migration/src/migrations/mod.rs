pub mod m202608120001_create_users;
pub mod m202608120002_create_org_units;
pub mod m202608120003_create_attendance;
