use alloc::boxed::Box;
use core::fmt;

use crate::adapter::take_item;
use crate::info::{GenericTypeInfoCell, PairInfo, PairKind, TypeInfo, Typed};
use crate::ops::Pair;
use crate::transcode::impl_transcode_cast_fn;
use crate::{Transcode, TranscodeError};

fn construct<K, V>(
    key: Box<dyn Transcode>,
    value: Box<dyn Transcode>,
) -> Result<Box<dyn Transcode>, TranscodeError>
where
    K: Transcode + Typed,
    V: Transcode + Typed,
{
    let key = take_item::<K>(key)?;
    let value = take_item::<V>(value)?;
    Ok(Box::new((key, value)))
}

impl<K: Transcode + Typed, V: Transcode + Typed> Typed for (K, V) {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Pair(
                PairInfo::new::<Self, K, V>(PairKind::KeyValue).with_constructor(construct::<K, V>),
            )
        })
    }
}

impl<K: Transcode + Typed, V: Transcode + Typed> Transcode for (K, V) {
    impl_transcode_cast_fn!(Pair);

    fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("")
            .field(&self.0.as_transcode())
            .field(&self.1.as_transcode())
            .finish()
    }
}

impl<K: Transcode + Typed, V: Transcode + Typed> Pair for (K, V) {
    #[inline]
    fn key(&self) -> &dyn Transcode {
        &self.0
    }

    #[inline]
    fn value(&self) -> &dyn Transcode {
        &self.1
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::{PairInfo, Typed};
    use crate::ops::Pair;
    use crate::{ShapeError, Transcode, TranscodeError};
    use alloc::string::String;

    #[test]
    fn constructs_from_both_slots() {
        let info = <(String, i32)>::type_info().as_pair().unwrap();
        assert_eq!(info.key_member().name(), PairInfo::KEY);
        assert_eq!(info.value_member().name(), PairInfo::VALUE);

        let pair = info
            .construct(String::from("k").into_boxed_transcode(), 3_i32.into_boxed_transcode())
            .unwrap()
            .take::<(String, i32)>()
            .unwrap();
        assert_eq!(pair, (String::from("k"), 3));
        assert_eq!(pair.value().downcast_ref::<i32>(), Some(&3));

        let err = info
            .construct(1_i32.into_boxed_transcode(), 3_i32.into_boxed_transcode())
            .unwrap_err();
        assert!(matches!(err, TranscodeError::Shape(ShapeError::MismatchedTypes { .. })));
    }
}
