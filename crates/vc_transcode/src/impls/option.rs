use alloc::boxed::Box;
use core::fmt;

use crate::Transcode;
use crate::info::{GenericTypeInfoCell, NullableInfo, TypeInfo, Typed};
use crate::ops::Nullable;
use crate::transcode::impl_transcode_cast_fn;

fn none<T: Transcode + Typed>() -> Box<dyn Transcode> {
    Box::new(None::<T>)
}

fn some<T: Transcode + Typed>(value: Box<dyn Transcode>) -> Result<Box<dyn Transcode>, Box<dyn Transcode>> {
    value
        .take::<T>()
        .map(|value| Box::new(Some(value)) as Box<dyn Transcode>)
}

impl<T: Transcode + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Nullable(NullableInfo::new::<Self, T>(none::<T>, some::<T>))
        })
    }
}

impl<T: Transcode + Typed> Transcode for Option<T> {
    impl_transcode_cast_fn!(Nullable);

    fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => f.debug_tuple("Some").field(&value.as_transcode()).finish(),
            None => f.write_str("None"),
        }
    }
}

impl<T: Transcode + Typed> Nullable for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Transcode> {
        self.as_ref().map(Transcode::as_transcode)
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Transcode> {
        self.as_mut().map(Transcode::as_transcode_mut)
    }

    #[inline]
    fn clear(&mut self) {
        *self = None;
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Transcode;
    use crate::info::Typed;
    use crate::ops::Nullable;
    use alloc::format;

    #[test]
    fn wraps_and_clears() {
        let info = <Option<i16>>::type_info().as_nullable().unwrap();
        assert!(info.inner().is::<i16>());

        let wrapped = info.some(4_i16.into_boxed_transcode()).unwrap();
        assert_eq!(wrapped.downcast_ref::<Option<i16>>(), Some(&Some(4)));
        assert!(info.some(4_u8.into_boxed_transcode()).is_err());
        assert_eq!(info.none().take::<Option<i16>>().unwrap(), None);

        let mut value = Some(1_i16);
        assert!(Nullable::get(&value).is_some());
        value.clear();
        assert_eq!(value, None);
    }

    #[test]
    fn debug_shows_the_inner_value() {
        assert_eq!(format!("{:?}", Some(3_u8).as_transcode()), "Some(3)");
        assert_eq!(format!("{:?}", None::<u8>.as_transcode()), "None");
    }
}
