use burn::{
    nn::{
        loss::{MseLoss, Reduction},
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::relu,
};

use crate::error::{AutoencoderError, Result as AeResult};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct AutoencoderConfig {
    /// Features per example
    pub input_dim:      usize,
    /// Size of the bottleneck
    pub latent_dim:     usize,
    /// Hidden widths of the encoder, input side first
    pub encoder_hidden: Vec<usize>,
    /// Hidden widths of the decoder, latent side first
    pub decoder_hidden: Vec<usize>,
}

impl AutoencoderConfig {
    pub fn validate(&self) -> AeResult<()> {
        if self.input_dim == 0 || self.latent_dim == 0 {
            return Err(AutoencoderError::invalid_config(
                "input_dim and latent_dim must be > 0",
            ));
        }
        if self.encoder_hidden.iter().chain(&self.decoder_hidden).any(|&w| w == 0) {
            return Err(AutoencoderError::invalid_config("hidden layer widths must be > 0"));
        }
        Ok(())
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> Autoencoder<B> {
        let encoder = MlpConfig::new(self.input_dim, self.encoder_hidden.clone(), self.latent_dim)
            .init(device);
        let decoder = MlpConfig::new(self.latent_dim, self.decoder_hidden.clone(), self.input_dim)
            .init(device);
        Autoencoder {
            encoder,
            decoder,
            input_dim:  self.input_dim,
            latent_dim: self.latent_dim,
        }
    }
}

/// Stack of affine layers with ReLU between them and nothing after the last.
#[derive(Config, Debug)]
pub struct MlpConfig {
    pub d_input:  usize,
    pub hidden:   Vec<usize>,
    pub d_output: usize,
}

impl MlpConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Mlp<B> {
        // [d_input, h0, h1, ..., d_output] → one Linear per adjacent pair
        let widths: Vec<usize> = std::iter::once(self.d_input)
            .chain(self.hidden.iter().copied())
            .chain(std::iter::once(self.d_output))
            .collect();

        let layers = widths
            .windows(2)
            .map(|w| LinearConfig::new(w[0], w[1]).with_bias(true).init(device))
            .collect();

        Mlp { layers }
    }
}

#[derive(Module, Debug)]
pub struct Mlp<B: Backend> {
    pub layers: Vec<Linear<B>>,
}

impl<B: Backend> Mlp<B> {
    /// x: [batch, d_input] → [batch, d_output]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let last = self.layers.len().saturating_sub(1);
        let mut x = x;
        for (i, layer) in self.layers.iter().enumerate() {
            x = layer.forward(x);
            if i < last {
                x = relu(x);
            }
        }
        x
    }
}

#[derive(Module, Debug)]
pub struct Autoencoder<B: Backend> {
    pub encoder:    Mlp<B>,
    pub decoder:    Mlp<B>,
    pub input_dim:  usize,
    pub latent_dim: usize,
}

impl<B: Backend> Autoencoder<B> {
    /// x: [batch, input_dim] → latent: [batch, latent_dim]
    pub fn encode(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        self.encoder.forward(x)
    }

    /// latent: [batch, latent_dim] → reconstruction: [batch, input_dim]
    pub fn decode(&self, latent: Tensor<B, 2>) -> Tensor<B, 2> {
        self.decoder.forward(latent)
    }

    /// Flatten every dim after the first, encode, decode, and reshape
    /// back. The output always has the input's shape.
    pub fn forward<const D: usize>(&self, x: Tensor<B, D>) -> Tensor<B, D> {
        let dims     = x.dims();
        let features = dims[1..].iter().product::<usize>();
        let flat: Tensor<B, 2> = x.reshape([dims[0], features]);

        let latent = self.encode(flat);
        self.decode(latent).reshape(dims)
    }

    /// Mean squared error between the reconstruction of `x` and `x`.
    pub fn forward_loss(&self, x: Tensor<B, 2>) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let reconstruction = self.forward(x.clone());
        let loss = MseLoss::new().forward(reconstruction.clone(), x, Reduction::Mean);
        (loss, reconstruction)
    }

    pub fn input_dim(&self) -> usize { self.input_dim }

    pub fn latent_dim(&self) -> usize { self.latent_dim }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn small_model() -> Autoencoder<TestBackend> {
        AutoencoderConfig::new(3, 1, vec![5], vec![5]).init(&Default::default())
    }

    #[test]
    fn test_layer_widths_mirror() {
        let model = AutoencoderConfig::new(6, 2, vec![8, 4], vec![4, 8])
            .init::<TestBackend>(&Default::default());

        let enc: Vec<[usize; 2]> = model.encoder.layers.iter().map(|l| l.weight.dims()).collect();
        let dec: Vec<[usize; 2]> = model.decoder.layers.iter().map(|l| l.weight.dims()).collect();
        // Burn stores Linear weights as [d_input, d_output]
        assert_eq!(enc, vec![[6, 8], [8, 4], [4, 2]]);
        assert_eq!(dec, vec![[2, 4], [4, 8], [8, 6]]);
        assert!(model.encoder.layers.iter().all(|l| l.bias.is_some()));
    }

    #[test]
    fn test_empty_hidden_is_single_affine() {
        let model = AutoencoderConfig::new(3, 1, vec![], vec![])
            .init::<TestBackend>(&Default::default());
        assert_eq!(model.encoder.layers.len(), 1);
        assert_eq!(model.decoder.layers.len(), 1);
    }

    #[test]
    fn test_encode_decode_shapes() {
        let model  = small_model();
        let x      = Tensor::<TestBackend, 2>::ones([4, 3], &Default::default());
        let latent = model.encode(x);
        assert_eq!(latent.dims(), [4, 1]);
        assert_eq!(model.decode(latent).dims(), [4, 3]);
    }

    #[test]
    fn test_reconstruction_shape_matches_input() {
        let model  = small_model();
        let device = Default::default();

        let x2 = Tensor::<TestBackend, 2>::ones([7, 3], &device);
        assert_eq!(model.forward(x2).dims(), [7, 3]);

        // Trailing dims are flattened to input_dim and restored afterwards
        let x3 = Tensor::<TestBackend, 3>::ones([5, 1, 3], &device);
        assert_eq!(model.forward(x3).dims(), [5, 1, 3]);
    }

    #[test]
    fn test_forward_loss_is_scalar_and_finite() {
        let model   = small_model();
        let x       = Tensor::<TestBackend, 2>::ones([2, 3], &Default::default());
        let (loss, recon) = model.forward_loss(x);
        assert_eq!(loss.dims(), [1]);
        assert_eq!(recon.dims(), [2, 3]);
        assert!(loss.into_scalar().elem::<f64>().is_finite());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        assert!(AutoencoderConfig::new(3, 0, vec![5], vec![5]).validate().is_err());
        assert!(AutoencoderConfig::new(3, 1, vec![0], vec![5]).validate().is_err());
        assert!(AutoencoderConfig::new(3, 1, vec![5], vec![5]).validate().is_ok());
    }
}
