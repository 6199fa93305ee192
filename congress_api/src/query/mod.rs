mod common;
pub use self::common::{Query, QueryCommon, SortDirection};

mod bill;
pub use self::bill::BillQuery;

mod member;
pub use self::member::MemberQuery;

mod amendment;
pub use self::amendment::AmendmentQuery;
