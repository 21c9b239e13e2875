//! Minimal XDR encoder used to build test envelopes.

#[derive(Default)]
pub(crate) struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn u64(&mut self, v: u64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn i64(&mut self, v: i64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.u32(v as u32)
    }

    pub fn fixed(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self.pad(data.len())
    }

    pub fn var(&mut self, data: &[u8]) -> &mut Self {
        self.u32(data.len() as u32);
        self.fixed(data)
    }

    fn pad(&mut self, len: usize) -> &mut Self {
        let pad = (4 - len % 4) % 4;
        self.buf.extend(std::iter::repeat(0u8).take(pad));
        self
    }

    /// `KEY_TYPE_ED25519` muxed account or account id.
    pub fn account(&mut self, key: &[u8; 32]) -> &mut Self {
        self.i32(0).fixed(key)
    }

    pub fn muxed_account(&mut self, id: u64, key: &[u8; 32]) -> &mut Self {
        self.i32(0x100).u64(id).fixed(key)
    }

    pub fn credit_asset(&mut self, code: &str, issuer: &[u8; 32]) -> &mut Self {
        let bytes = code.as_bytes();
        if bytes.len() <= 4 {
            let mut raw = [0u8; 4];
            raw[..bytes.len()].copy_from_slice(bytes);
            self.i32(1).fixed(&raw);
        } else {
            let mut raw = [0u8; 12];
            raw[..bytes.len()].copy_from_slice(bytes);
            self.i32(2).fixed(&raw);
        }
        self.account(issuer)
    }

    /// Payment operation without a source override.
    pub fn payment(&mut self, dest: &[u8; 32], code: &str, issuer: &[u8; 32], amount: i64) -> &mut Self {
        self.bool(false).i32(1).account(dest).credit_asset(code, issuer).i64(amount)
    }

    /// One signature with a zero hint and a 64-byte zero signature.
    pub fn one_signature(&mut self) -> &mut Self {
        self.u32(1).fixed(&[0u8; 4]).var(&[0u8; 64])
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }
}
