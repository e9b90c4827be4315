//! Closed sets of genre tags and US states, used for validating venue/artist data and for filtering
//! queries.
//!
//! Both enumerations are stored in the database by their label text. Parsing is a plain lookup in
//! the constant table of each enumeration.

use diesel::backend::Backend;
use diesel::deserialize::FromSql;
use diesel::serialize::ToSql;
use diesel::{AsExpression, FromSqlRow};
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct EnumMemberNotExistingError {
    pub member_value: String,
    pub enum_name: &'static str,
}

impl Display for EnumMemberNotExistingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not a valid value for {} enum",
            self.member_value, self.enum_name
        )
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromSqlRow, AsExpression)]
#[diesel(sql_type = diesel::sql_types::Text)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    HipHop,
    HeavyMetal,
    Instrumental,
    Jazz,
    MusicalTheatre,
    Pop,
    Punk,
    RnB,
    Reggae,
    RocknRoll,
    Soul,
    Other,
}

/// (member, label, identifier)
const GENRES: [(Genre, &str, &str); 19] = [
    (Genre::Alternative, "Alternative", "Alternative"),
    (Genre::Blues, "Blues", "Blues"),
    (Genre::Classical, "Classical", "Classical"),
    (Genre::Country, "Country", "Country"),
    (Genre::Electronic, "Electronic", "Electronic"),
    (Genre::Folk, "Folk", "Folk"),
    (Genre::Funk, "Funk", "Funk"),
    (Genre::HipHop, "Hip-Hop", "HipHop"),
    (Genre::HeavyMetal, "Heavy Metal", "HeavyMetal"),
    (Genre::Instrumental, "Instrumental", "Instrumental"),
    (Genre::Jazz, "Jazz", "Jazz"),
    (Genre::MusicalTheatre, "Musical Theatre", "MusicalTheatre"),
    (Genre::Pop, "Pop", "Pop"),
    (Genre::Punk, "Punk", "Punk"),
    (Genre::RnB, "R&B", "RnB"),
    (Genre::Reggae, "Reggae", "Reggae"),
    (Genre::RocknRoll, "Rock n Roll", "RocknRoll"),
    (Genre::Soul, "Soul", "Soul"),
    (Genre::Other, "Other", "Other"),
];

impl Genre {
    pub fn all() -> impl Iterator<Item = Genre> {
        GENRES.iter().map(|(genre, _, _)| *genre)
    }

    /// Human-readable name of the genre, which is also its database representation
    pub fn label(&self) -> &'static str {
        GENRES
            .iter()
            .find(|(genre, _, _)| genre == self)
            .map(|(_, label, _)| *label)
            .expect("Every Genre member should be listed in the GENRES table")
    }

    /// Look up a genre by its label ("Hip-Hop") or its identifier ("HipHop")
    pub fn from_label(value: &str) -> Option<Genre> {
        GENRES
            .iter()
            .find(|(_, label, identifier)| *label == value || *identifier == value)
            .map(|(genre, _, _)| *genre)
    }
}

impl TryFrom<&str> for Genre {
    type Error = EnumMemberNotExistingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Genre::from_label(value).ok_or_else(|| EnumMemberNotExistingError {
            member_value: value.to_owned(),
            enum_name: "Genre",
        })
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl<DB> ToSql<diesel::sql_types::Text, DB> for Genre
where
    DB: Backend,
    str: ToSql<diesel::sql_types::Text, DB>,
{
    fn to_sql<'b>(
        &'b self,
        out: &mut diesel::serialize::Output<'b, '_, DB>,
    ) -> diesel::serialize::Result {
        <str as ToSql<diesel::sql_types::Text, DB>>::to_sql(self.label(), out)
    }
}

impl<DB> FromSql<diesel::sql_types::Text, DB> for Genre
where
    DB: Backend,
    String: FromSql<diesel::sql_types::Text, DB>,
{
    fn from_sql(bytes: DB::RawValue<'_>) -> diesel::deserialize::Result<Self> {
        let value = String::from_sql(bytes)?;
        Genre::try_from(value.as_str()).map_err(|e| e.to_string().into())
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromSqlRow, AsExpression)]
#[diesel(sql_type = diesel::sql_types::Text)]
pub enum State {
    AL,
    AK,
    AZ,
    AR,
    CA,
    CO,
    CT,
    DE,
    DC,
    FL,
    GA,
    HI,
    ID,
    IL,
    IN,
    IA,
    KS,
    KY,
    LA,
    ME,
    MT,
    NE,
    NV,
    NH,
    NJ,
    NM,
    NY,
    NC,
    ND,
    OH,
    OK,
    OR,
    MD,
    MA,
    MI,
    MN,
    MS,
    MO,
    PA,
    RI,
    SC,
    SD,
    TN,
    TX,
    UT,
    VT,
    VA,
    WA,
    WV,
    WI,
    WY,
}

const STATES: [(State, &str); 51] = [
    (State::AL, "AL"),
    (State::AK, "AK"),
    (State::AZ, "AZ"),
    (State::AR, "AR"),
    (State::CA, "CA"),
    (State::CO, "CO"),
    (State::CT, "CT"),
    (State::DE, "DE"),
    (State::DC, "DC"),
    (State::FL, "FL"),
    (State::GA, "GA"),
    (State::HI, "HI"),
    (State::ID, "ID"),
    (State::IL, "IL"),
    (State::IN, "IN"),
    (State::IA, "IA"),
    (State::KS, "KS"),
    (State::KY, "KY"),
    (State::LA, "LA"),
    (State::ME, "ME"),
    (State::MT, "MT"),
    (State::NE, "NE"),
    (State::NV, "NV"),
    (State::NH, "NH"),
    (State::NJ, "NJ"),
    (State::NM, "NM"),
    (State::NY, "NY"),
    (State::NC, "NC"),
    (State::ND, "ND"),
    (State::OH, "OH"),
    (State::OK, "OK"),
    (State::OR, "OR"),
    (State::MD, "MD"),
    (State::MA, "MA"),
    (State::MI, "MI"),
    (State::MN, "MN"),
    (State::MS, "MS"),
    (State::MO, "MO"),
    (State::PA, "PA"),
    (State::RI, "RI"),
    (State::SC, "SC"),
    (State::SD, "SD"),
    (State::TN, "TN"),
    (State::TX, "TX"),
    (State::UT, "UT"),
    (State::VT, "VT"),
    (State::VA, "VA"),
    (State::WA, "WA"),
    (State::WV, "WV"),
    (State::WI, "WI"),
    (State::WY, "WY"),
];

impl State {
    pub fn all() -> impl Iterator<Item = State> {
        STATES.iter().map(|(state, _)| *state)
    }

    /// The two-letter postal code of the state
    pub fn label(&self) -> &'static str {
        STATES
            .iter()
            .find(|(state, _)| state == self)
            .map(|(_, label)| *label)
            .expect("Every State member should be listed in the STATES table")
    }

    pub fn from_label(value: &str) -> Option<State> {
        STATES
            .iter()
            .find(|(_, label)| *label == value)
            .map(|(state, _)| *state)
    }
}

impl TryFrom<&str> for State {
    type Error = EnumMemberNotExistingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        State::from_label(value).ok_or_else(|| EnumMemberNotExistingError {
            member_value: value.to_owned(),
            enum_name: "State",
        })
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl<DB> ToSql<diesel::sql_types::Text, DB> for State
where
    DB: Backend,
    str: ToSql<diesel::sql_types::Text, DB>,
{
    fn to_sql<'b>(
        &'b self,
        out: &mut diesel::serialize::Output<'b, '_, DB>,
    ) -> diesel::serialize::Result {
        <str as ToSql<diesel::sql_types::Text, DB>>::to_sql(self.label(), out)
    }
}

impl<DB> FromSql<diesel::sql_types::Text, DB> for State
where
    DB: Backend,
    String: FromSql<diesel::sql_types::Text, DB>,
{
    fn from_sql(bytes: DB::RawValue<'_>) -> diesel::deserialize::Result<Self> {
        let value = String::from_sql(bytes)?;
        State::try_from(value.as_str()).map_err(|e| e.to_string().into())
    }
}
