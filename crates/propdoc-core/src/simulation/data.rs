//! Sample values for synthetic documents.

pub const TENANT_NAMES: &[&str] = &[
    "Sarah Jones",
    "Michael Chen",
    "Priya Patel",
    "Tom Williams",
    "Acme Retail Ltd",
    "Green Leaf Cafe Ltd",
];

pub const LANDLORD_NAMES: &[&str] = &[
    "Harbour Estates Ltd",
    "Northgate Holdings",
    "Castle Property Group",
    "Riverside Lettings",
];

pub const STREET_ADDRESSES: &[&str] = &[
    "12 Harbour View, Bristol BS1 4QA",
    "Flat 3, 48 Mill Lane, Leeds LS2 7HT",
    "221 Kingsway, Manchester M19 2LL",
    "7 Orchard Close, Bath BA2 6PN",
    "Unit 5, Station Road, Reading RG1 1LG",
];

pub const PROPERTY_NAMES: &[&str] = &[
    "Riverside Court",
    "Kingsway House",
    "The Maltings",
    "Orchard Place",
    "Victoria Wharf",
];

pub const INSPECTOR_NAMES: &[&str] = &[
    "Dan Price",
    "Helen Carter",
    "Tom Baker",
    "Aisha Rahman",
];

pub const BUDGET_CATEGORIES: &[&str] = &[
    "Cleaning",
    "Insurance",
    "Repairs & Maintenance",
    "Management Fee",
    "Communal Utilities",
    "Reserve Fund",
    "Landscaping",
    "Security",
];

/// Unit types with their apportionment weight in tenths.
pub const UNIT_WEIGHTS: &[(&str, i64)] = &[
    ("Studio", 6),
    ("One Bed", 8),
    ("Two Bed", 10),
    ("Three Bed", 13),
];

pub const EPC_BANDS: &[&str] = &["B", "C", "C", "D", "D", "E"];
