//! Shared test fixtures: an account record with nested object and array
//! fields, exercising every encode/decode primitive.

// Each integration test binary compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

use jsonknit::{
    ArrayDecodable, ArrayEncodable, ArrayEncoder, Decodable, DecodeRoot, Encodable, Encoder,
    Result, Value,
};

pub const WIRE: &str = r#"{"name":"Test Name","greeting":"Hello \"world\"!","age":32,"activeUser":true,"additional":{"dateCreated":"2017-01-01","lastLogin":"2017-01-01"},"additionals":[{"dateCreated":"2017-01-01","lastLogin":"2017-01-01"},{"dateCreated":"2017-01-02","lastLogin":"2017-01-02"},{"dateCreated":"2017-01-03","lastLogin":"2017-01-03"}]}"#;

pub const WIRE_EXPANDED: &str = r#"
{
	"name" : "Test Name",
	"greeting" : "Hello \"world\"!",
	"age" : 32,
	"activeUser" : true,
	"additional" : {
		"dateCreated" : "2017-01-01",
		"lastLogin" : "2017-01-01"
	},
	"additionals" : [
		{
			"dateCreated" : "2017-01-01",
			"lastLogin" : "2017-01-01"
		},
		{
			"dateCreated" : "2017-01-02",
			"lastLogin" : "2017-01-02"
		},
		{
			"dateCreated" : "2017-01-03",
			"lastLogin" : "2017-01-03"
		}
	]
}
"#;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Session {
    pub date_created: String,
    pub last_login: String,
}

impl Session {
    pub fn on(day: &str) -> Self {
        Self {
            date_created: day.to_owned(),
            last_login: day.to_owned(),
        }
    }
}

impl Encodable for Session {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<()> {
        enc.string("dateCreated", &self.date_created);
        enc.string("lastLogin", &self.last_login);
        Ok(())
    }
}

impl Decodable for Session {
    fn decode_field(&mut self, key: &str, value: &mut Value<'_, '_>) -> Result<()> {
        match key {
            "dateCreated" => self.date_created = value.string()?.to_owned(),
            "lastLogin" => self.last_login = value.string()?.to_owned(),
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sessions(pub Vec<Session>);

impl ArrayEncodable for Sessions {
    fn encode_elements(&self, enc: &mut ArrayEncoder<'_, '_>) -> Result<()> {
        for session in &self.0 {
            enc.object(session)?;
        }
        Ok(())
    }
}

impl ArrayDecodable for Sessions {
    fn decode_element(&mut self, value: &mut Value<'_, '_>) -> Result<()> {
        let mut session = Session::default();
        value.object(&mut session)?;
        self.0.push(session);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Account {
    pub name: String,
    pub greeting: String,
    pub age: f64,
    pub active_user: bool,
    pub additional: Session,
    pub additionals: Sessions,
}

impl Encodable for Account {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<()> {
        enc.string("name", &self.name);
        enc.string("greeting", &self.greeting);
        enc.number("age", self.age);
        enc.boolean("activeUser", self.active_user);
        enc.object("additional", &self.additional)?;
        enc.array("additionals", &self.additionals)?;
        Ok(())
    }
}

impl Decodable for Account {
    fn decode_field(&mut self, key: &str, value: &mut Value<'_, '_>) -> Result<()> {
        match key {
            "name" => self.name = value.string()?.to_owned(),
            "greeting" => self.greeting = value.string()?.to_owned(),
            "age" => self.age = value.number()?,
            "activeUser" => self.active_user = value.boolean()?,
            "additional" => value.object(&mut self.additional)?,
            "additionals" => value.array(&mut self.additionals)?,
            _ => {}
        }
        Ok(())
    }
}

impl DecodeRoot for Account {
    fn as_object(&mut self) -> Option<&mut dyn Decodable> {
        Some(self)
    }
}

pub fn sample_account() -> Account {
    Account {
        name: "Test Name".to_owned(),
        greeting: r#"Hello "world"!"#.to_owned(),
        age: 32.0,
        active_user: true,
        additional: Session::on("2017-01-01"),
        additionals: Sessions(vec![
            Session::on("2017-01-01"),
            Session::on("2017-01-02"),
            Session::on("2017-01-03"),
        ]),
    }
}
