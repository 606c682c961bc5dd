/// (De)serialization of comma separated lists in query strings, e.g.
/// `?status=PLANNED,IN_PROGRESS`.
pub mod comma_separated {
    use serde::{
        de::{value::StrDeserializer, DeserializeOwned},
        Deserialize as _, Deserializer,
    };

    pub fn deserialize_option<'de, D, T>(
        deserializer: D,
    ) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) => split(&s).map(Some),
            None => Ok(None),
        }
    }

    fn split<T, E>(s: &str) -> Result<Vec<T>, E>
    where
        T: DeserializeOwned,
        E: serde::de::Error,
    {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                T::deserialize(StrDeserializer::<E>::new(part))
            })
            .collect()
    }

}
