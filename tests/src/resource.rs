/// Record used throughout the tests.
///
/// `create_time` is filled by a column default, so only a read-back shows
/// it. `etag` and `note` are never written.
#[derive(Debug, Default, Clone, PartialEq, patchwork::Record)]
pub struct Resource {
    #[column("name")]
    pub name: String,

    #[column("display_name")]
    pub display_name: String,

    #[column("quantity")]
    pub quantity: i64,

    #[column("region")]
    pub region: String,

    #[column("create_time")]
    pub create_time: String,

    #[column(skip)]
    pub etag: String,

    pub note: String,
}

impl Resource {
    pub const TABLE: &'static str = "resources";

    pub const DDL: &'static str = "
        CREATE TABLE resources (
            name TEXT PRIMARY KEY,
            display_name TEXT NOT NULL DEFAULT '',
            quantity INTEGER NOT NULL DEFAULT 0,
            region TEXT NOT NULL DEFAULT '',
            create_time TEXT NOT NULL DEFAULT 'server-default'
        );
        CREATE TRIGGER resources_frozen BEFORE INSERT ON resources
        WHEN NEW.region = 'frozen'
        BEGIN
            SELECT RAISE(IGNORE);
        END;
    ";

    pub fn new(name: &str, display_name: &str, quantity: i64) -> Resource {
        Resource {
            name: name.to_string(),
            display_name: display_name.to_string(),
            quantity,
            ..Default::default()
        }
    }

    pub fn in_region(mut self, region: &str) -> Resource {
        self.region = region.to_string();
        self
    }
}
