/// One stage of a signal chain.
pub trait Block {
    type Input;
    type Output: Copy;

    fn input(&mut self, value: Self::Input);

    fn output(&self) -> Self::Output;

    fn feed(&mut self, value: Self::Input) -> &mut Self {
        self.input(value);
        self
    }

    /// Feeds this block's current output into `next` and returns `next` for chaining.
    fn pipe_into<'b, B>(&self, next: &'b mut B) -> &'b mut B
    where
        B: Block<Input = Self::Output>,
    {
        next.feed(self.output())
    }
}

/// Identity block: the output is the last input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Passthrough<T> {
    out: T,
}

impl<T> Passthrough<T>
where
    T: Copy,
{
    pub fn new(initial: T) -> Self {
        Self { out: initial }
    }
}

impl<T> Block for Passthrough<T>
where
    T: Copy,
{
    type Input = T;
    type Output = T;

    #[inline]
    fn input(&mut self, value: T) {
        self.out = value;
    }

    #[inline]
    fn output(&self) -> T {
        self.out
    }
}
