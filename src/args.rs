use crate::error::ArgsError;
use crate::type_tag::MockArg;

///
/// A tuple that can be built from recorded arguments.
///
/// Stubs and callbacks receive the arguments of a call as a tuple of owned values:
/// `()`, `(A,)`, `(A, B)` and so on, up to six elements.
///
pub trait FromArgs: Sized {
    /// The number of arguments the tuple consumes.
    const ARITY: usize;

    fn from_args(args: &[Box<dyn MockArg>]) -> Result<Self, ArgsError>;
}

fn check_arity(expected: usize, args: &[Box<dyn MockArg>]) -> Result<(), ArgsError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ArgsError::Arity {
            expected,
            actual: args.len(),
        })
    }
}

fn downcast_arg<T: MockArg + Clone>(
    args: &[Box<dyn MockArg>],
    index: usize,
) -> Result<T, ArgsError> {
    let arg = args.get(index).ok_or(ArgsError::Arity {
        expected: index + 1,
        actual: args.len(),
    })?;

    arg.as_any()
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| ArgsError::Downcast {
            index,
            expected: core::any::type_name::<T>(),
            actual: arg.runtime_type().name(),
        })
}

impl FromArgs for () {
    const ARITY: usize = 0;

    fn from_args(args: &[Box<dyn MockArg>]) -> Result<Self, ArgsError> {
        check_arity(Self::ARITY, args)
    }
}

macro_rules! tuple_from_args {
    ($n:expr; $(($t:ident, $i:tt)),+) => {
        impl<$($t),+> FromArgs for ($($t,)+)
        where
            $($t: MockArg + Clone),+
        {
            const ARITY: usize = $n;

            fn from_args(args: &[Box<dyn MockArg>]) -> Result<Self, ArgsError> {
                check_arity(Self::ARITY, args)?;
                Ok(($(downcast_arg::<$t>(args, $i)?,)+))
            }
        }
    };
}

tuple_from_args!(1; (A, 0));
tuple_from_args!(2; (A, 0), (B, 1));
tuple_from_args!(3; (A, 0), (B, 1), (C, 2));
tuple_from_args!(4; (A, 0), (B, 1), (C, 2), (D, 3));
tuple_from_args!(5; (A, 0), (B, 1), (C, 2), (D, 3), (E, 4));
tuple_from_args!(6; (A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5));
