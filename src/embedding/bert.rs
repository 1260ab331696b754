use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

fn load_bert(vb: VarBuilder, config: &Config) -> Result<BertModel> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb, config)
    }
}

fn load_config_and_weights(model_dir: &Path, device: &Device) -> Result<(Config, VarBuilder<'static>)> {
    let config_path = model_dir.join("config.json");
    let weights_path = model_dir.join("model.safetensors");

    let config_content = std::fs::read_to_string(config_path)?;
    let config: Config = serde_json::from_str(&config_content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

    Ok((config, vb))
}

struct BertSentenceEncoderImpl {
    bert: BertModel,
    hidden_size: usize,
}

impl BertSentenceEncoderImpl {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let bert = load_bert(vb, config)?;
        Ok(Self {
            bert,
            hidden_size: config.hidden_size,
        })
    }

    /// Mean-pools token states over the attention mask.
    ///
    /// `hidden` is [batch, seq, hidden]; `attention_mask` is [batch, seq].
    fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.maximum(1e-9)?;
        summed.broadcast_div(&counts)
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        Self::mean_pool(&output, attention_mask)
    }
}

/// Bi-encoder backbone: BERT with mean pooling over the attention mask.
#[derive(Clone)]
pub struct BertSentenceEncoder(std::sync::Arc<BertSentenceEncoderImpl>);

impl BertSentenceEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let (config, vb) = load_config_and_weights(model_dir.as_ref(), device)?;
        let model = BertSentenceEncoderImpl::load(vb, &config)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    pub fn hidden_size(&self) -> usize {
        self.0.hidden_size
    }

    /// Returns pooled embeddings, shape [batch, hidden].
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }
}

struct BertPairClassifierImpl {
    bert: BertModel,
    classifier: Linear,
}

impl BertPairClassifierImpl {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let bert = load_bert(vb.clone(), config)?;
        let classifier = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))?;

        Ok(Self { bert, classifier })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        self.classifier.forward(&cls_token)
    }
}

/// Cross-encoder backbone: BERT with a single-logit classification head over
/// the CLS token.
#[derive(Clone)]
pub struct BertPairClassifier(std::sync::Arc<BertPairClassifierImpl>);

impl BertPairClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let (config, vb) = load_config_and_weights(model_dir.as_ref(), device)?;
        let model = BertPairClassifierImpl::load(vb, &config)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }
}
