/// Build a [`Record`](crate::data::Record) from `name => value` pairs.
///
/// Values go through `Into<Data>`, so integers, strings, booleans, big
/// integers, options and vectors can be written directly:
///
/// ```
/// use graphshrew_support::{record, data::Data};
///
/// let user = record! {
///     "id" => "1",
///     "fromBatchId" => 0,
///     "txHash" => Data::bytes(format!("0x{}", "00".repeat(32))),
/// };
/// assert_eq!(user["id"], Data::String("1".into()));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::data::Record::new()
    };
    ( $( $name:expr => $value:expr ),+ $(,)? ) => {{
        let mut record = $crate::data::Record::new();
        $(
            record.insert(
                ::std::string::String::from($name),
                $crate::data::Data::from($value),
            );
        )+
        record
    }};
}
